use reqwest::blocking::{Request, Response};

/// Executes a prepared request. Implementations may decorate the request
/// (auth headers, etc.) before handing it to an inner client.
pub trait HttpClient {
    fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
