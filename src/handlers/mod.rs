// handlers/mod.rs - HTTP boundary
//
// Handlers pull the token and body out of the request, call one business
// operation, and wrap the result. Error-to-status mapping lives in ApiError.

pub mod music;
pub mod playlist;
pub mod system;
pub mod user;
