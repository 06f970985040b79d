mod credential;
mod login;

pub use credential::Credential;
pub use login::{login, logout, LoginCredentials, LoginResponse, LOGIN_ENDPOINT, LOGOUT_ENDPOINT};
