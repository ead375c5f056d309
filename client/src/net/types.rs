//! Wire DTOs shared by the REST client, state, and components.
//!
//! DESIGN
//! ======
//! These types mirror the AOI backend's JSON so serde round-trips stay
//! lossless. Geometry is carried as GeoJSON via `mapcore` and never
//! reshaped on the way between map, list, and API.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

pub use mapcore::geometry::Geometry;

/// An area of interest as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aoi {
    /// Backend-assigned identifier; absent until the record is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// GeoJSON `Polygon` or `MultiPolygon`.
    pub geometry: Geometry,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub monitoring_enabled: bool,
    /// Creation timestamp as sent by the backend; never written by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Aoi {
    /// Copy of this record with one boolean flag replaced.
    #[must_use]
    pub fn with_flag(&self, flag: AoiFlag, value: bool) -> Self {
        let mut next = self.clone();
        match flag {
            AoiFlag::IsActive => next.is_active = value,
            AoiFlag::MonitoringEnabled => next.monitoring_enabled = value,
        }
        next
    }

    /// Copy of this record carrying a new geometry.
    #[must_use]
    pub fn with_geometry(&self, geometry: Geometry) -> Self {
        Self { geometry, ..self.clone() }
    }

    /// Geodesic area of the geometry, formatted for display.
    #[must_use]
    pub fn area_label(&self) -> String {
        mapcore::geometry::format_area(self.geometry.area_m2())
    }

    #[must_use]
    pub fn flag(&self, flag: AoiFlag) -> bool {
        match flag {
            AoiFlag::IsActive => self.is_active,
            AoiFlag::MonitoringEnabled => self.monitoring_enabled,
        }
    }
}

/// The two boolean switches an AOI exposes in the list panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AoiFlag {
    IsActive,
    MonitoringEnabled,
}

impl AoiFlag {
    /// JSON field name of the flag.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::IsActive => "is_active",
            Self::MonitoringEnabled => "monitoring_enabled",
        }
    }

    /// Short label shown next to the switch.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::IsActive => "Active",
            Self::MonitoringEnabled => "Monitoring",
        }
    }
}

/// Signed-in user record, cached verbatim in browser storage.
///
/// Only the fields the UI reads are typed; everything else the backend sends
/// is kept in `extra` so a save/load cycle returns the same record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Name shown in the navbar: username, then email, then a placeholder.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Account".to_owned())
    }
}

/// Body of `POST /api/auth/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST /api/auth/login/`.
///
/// Backends differ on the token field name, so all three spellings are
/// accepted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    /// JWT refresh token, sent only by token-pair backends.
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl LoginResponse {
    /// Session token, preferring `key`, then `token`, then `access`.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        [&self.key, &self.token, &self.access]
            .into_iter()
            .find_map(|t| t.as_deref().filter(|t| !t.is_empty()))
    }
}

/// Body of `POST /api/auth/token/refresh/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

/// Response of `POST /api/auth/token/refresh/`. `refresh` is present only
/// when the backend rotates refresh tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenRefreshResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}
