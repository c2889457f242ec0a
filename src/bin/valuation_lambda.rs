//! AWS Lambda HTTP handler: POST a valuation request, get the result as JSON

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use restaurant_valuation::api::handle_request;

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let response = handle_request(event.body());
    log::info!("Valuation request answered with {}", response.status);

    let resp = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(Body::Text(response.body))
        .map_err(Box::new)?;
    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
