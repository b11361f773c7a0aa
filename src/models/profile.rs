use serde::{Deserialize, Serialize};

/// Server-issued user record; replaced wholesale, never patched locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(rename = "full_name", default)]
    pub display_name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(rename = "is_venue_owner", default)]
    pub owner: bool,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_auth_provider")]
    pub auth_provider: String,
}

fn default_role() -> String {
    "user".to_string()
}

fn default_auth_provider() -> String {
    "password".to_string()
}

impl Profile {
    /// Name shown in the layout: full name, else email
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}

/// `data` of `/auth/login`, `/auth/signup` and `/auth/google`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub profile: Profile,
}

/// `data` of `/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEnvelope {
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    pub is_venue_owner: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleLoginRequest {
    pub id_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_venue_owner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_reads_server_field_names() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "64f0",
            "email": "a@b.com",
            "full_name": "Ayesha Khan",
            "contact_number": "+92 300 0000000",
            "is_venue_owner": true,
            "role": "owner",
            "auth_provider": "google"
        }))
        .unwrap();

        assert!(profile.owner);
        assert_eq!(profile.label(), "Ayesha Khan");
        assert_eq!(profile.auth_provider, "google");
    }

    #[test]
    fn label_falls_back_to_email() {
        let profile: Profile = serde_json::from_value(json!({ "id": "1", "email": "a@b.com" })).unwrap();
        assert_eq!(profile.label(), "a@b.com");
        assert_eq!(profile.role, "user");
        assert!(!profile.owner);
    }

    #[test]
    fn signup_omits_absent_optional_fields() {
        let body = serde_json::to_value(SignupRequest {
            email: "a@b.com".into(),
            password: "secret".into(),
            is_venue_owner: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "email": "a@b.com", "password": "secret", "is_venue_owner": false }));
    }
}
