#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ironfit_web::run().await
}
