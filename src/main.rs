use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    brachabot::run().await
}
