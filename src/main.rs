#[tokio::main]
async fn main() {
    lunch_backend::run().await;
}
