#[actix_web::main]
async fn main() -> std::io::Result<()> {
    activity_report_server::run().await
}
