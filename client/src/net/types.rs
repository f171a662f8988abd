//! Wire DTOs for the NearBuy REST boundary.
//!
//! DESIGN
//! ======
//! Decoders are deliberately lenient about spelling (upper/lower-case roles,
//! `shop_id` vs `shopId`, hit-wrapped vs flat search documents) because the
//! backend mixes conventions across endpoints. Encoders emit exactly the
//! field names the signup endpoints expect.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::api::{SIGNUP_USER_PATH, SIGNUP_VENDOR_PATH};

/// Placeholder shop latitude sent with vendor signups until the vendor edits it.
pub const PLACEHOLDER_SHOP_LATITUDE: f64 = 20.2961;
/// Placeholder shop longitude sent with vendor signups until the vendor edits it.
pub const PLACEHOLDER_SHOP_LONGITUDE: f64 = 85.8245;

// =============================================================================
// IDENTITY
// =============================================================================

/// Account role. The backend spells roles upper-case; both forms decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[serde(alias = "USER")]
    User,
    #[serde(alias = "VENDOR")]
    Vendor,
}

impl Role {
    /// Form/select value for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Vendor => "vendor",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Vendor => "Vendor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "vendor" => Ok(Self::Vendor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The authenticated user record held by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_string_from_any")]
    pub id: String,
    #[serde(rename = "fullName", default, deserialize_with = "deserialize_string_or_null")]
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

/// Successful login: the server message plus the identity now in session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub message: String,
    pub identity: User,
}

// =============================================================================
// SEARCH
// =============================================================================

/// Device position reported by the geolocation capability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One display row of a nearby search, in server order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SearchHit")]
pub struct SearchResult {
    pub shop_id: String,
    pub shop_name: String,
    pub address: String,
    pub item_name: Option<String>,
    pub price: Option<f64>,
}

/// Search engines wrap each document in a hit; some proxies flatten it.
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchHit {
    Wrapped { document: ShopDocument },
    Flat(ShopDocument),
}

#[derive(Deserialize)]
struct ShopDocument {
    #[serde(rename = "shop_id", alias = "shopId", deserialize_with = "deserialize_string_from_any")]
    shop_id: String,
    #[serde(rename = "shopName", alias = "shop_name", default)]
    shop_name: String,
    #[serde(default)]
    address: String,
    #[serde(rename = "itemName", alias = "item_name", default)]
    item_name: Option<String>,
    #[serde(default)]
    price: Option<f64>,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        let doc = match hit {
            SearchHit::Wrapped { document } | SearchHit::Flat(document) => document,
        };
        Self {
            shop_id: doc.shop_id,
            shop_name: doc.shop_name,
            address: doc.address,
            item_name: doc.item_name,
            price: doc.price,
        }
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Role-specific signup body. Serialized untagged: the endpoint carries the role.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegistrationPayload {
    User(UserSignup),
    Vendor(VendorSignup),
}

impl RegistrationPayload {
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Vendor(_) => Role::Vendor,
        }
    }

    /// Signup path relative to the API base.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::User(_) => SIGNUP_USER_PATH,
            Self::Vendor(_) => SIGNUP_VENDOR_PATH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSignup {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSignup {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub shop_name: String,
    pub address: String,
    pub contact: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "is_open")]
    pub is_open: bool,
}

impl VendorSignup {
    /// Vendor signup with placeholder shop coordinates and the shop open.
    #[must_use]
    pub fn new(user: UserSignup, shop_name: String, address: String, contact: String) -> Self {
        Self {
            full_name: user.full_name,
            email: user.email,
            password: user.password,
            shop_name,
            address,
            contact,
            latitude: PLACEHOLDER_SHOP_LATITUDE,
            longitude: PLACEHOLDER_SHOP_LONGITUDE,
            is_open: true,
        }
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// `GET /status/health` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: i64,
}

/// `GET /status/info` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub app: String,
    pub version: String,
    #[serde(default)]
    pub docs: String,
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
