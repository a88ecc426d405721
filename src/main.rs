#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    journal::run().await
}
