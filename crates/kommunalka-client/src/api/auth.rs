use reqwest::Client;

use kommunalka_types::UserId;
use kommunalka_types::api::{
    CheckUserResponse, CompleteRegistrationRequest, CompleteRegistrationResponse,
    SendCodeRequest, SendCodeResponse, VerifyCodeRequest, VerifyCodeResponse,
};

use super::Endpoint;
use crate::error::Result;

/// Phone/OTP login and registration.
#[derive(Debug, Clone)]
pub struct AuthClient {
    endpoint: Endpoint,
}

impl AuthClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::new(http, base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }

    /// `phone` must already be normalized.
    pub async fn send_code(&self, phone: &str) -> Result<SendCodeResponse> {
        let req = SendCodeRequest {
            phone: phone.to_string(),
        };
        self.endpoint.post("send-code", &req).await
    }

    pub async fn verify_code(&self, phone: &str, code: &str) -> Result<VerifyCodeResponse> {
        let req = VerifyCodeRequest {
            phone: phone.to_string(),
            code: code.to_string(),
        };
        self.endpoint.post("verify-code", &req).await
    }

    pub async fn complete_registration(
        &self,
        user_id: &UserId,
        full_name: &str,
        email: Option<&str>,
    ) -> Result<CompleteRegistrationResponse> {
        let req = CompleteRegistrationRequest {
            user_id: user_id.clone(),
            full_name: full_name.to_string(),
            email: email.map(str::to_string),
        };
        self.endpoint.post("complete-registration", &req).await
    }

    pub async fn check_user(&self, phone: &str) -> Result<CheckUserResponse> {
        self.endpoint.get("check-user", &[("phone", phone)]).await
    }
}
