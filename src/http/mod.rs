pub mod requestbody;
pub mod response;
pub mod responsebody;
pub mod transaction;

// Re-exports for convenience
pub use requestbody::RequestBody;
pub use response::HttpResponse;
pub use responsebody::ResponseBody;
