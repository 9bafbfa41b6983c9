//! Tenant scope and the two parameter conventions accepted by the service.

/// (appId, externalUserId) pair. Unset fields fall back to the client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantScope {
    pub app_id: Option<String>,
    pub external_user_id: Option<String>,
}

impl TenantScope {
    pub fn new(app_id: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            external_user_id: Some(external_user_id.into()),
        }
    }

    /// Override only the application id.
    pub fn app(app_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            external_user_id: None,
        }
    }

    /// Override only the external user id.
    pub fn user(external_user_id: impl Into<String>) -> Self {
        Self {
            app_id: None,
            external_user_id: Some(external_user_id.into()),
        }
    }

    /// Fill unset (or empty) fields from `defaults`. Explicit values win.
    pub fn or(&self, defaults: &TenantScope) -> TenantScope {
        TenantScope {
            app_id: pick(&self.app_id, &defaults.app_id),
            external_user_id: pick(&self.external_user_id, &defaults.external_user_id),
        }
    }
}

fn pick(explicit: &Option<String>, fallback: &Option<String>) -> Option<String> {
    explicit
        .as_ref()
        .filter(|s| !s.is_empty())
        .or(fallback.as_ref())
        .cloned()
}

/// Where the tenant scope travels on store/query/create-bundle calls.
///
/// Both styles hit the same endpoint with the same method; the service accepts
/// either for compatibility with its two historical API shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamStyle {
    /// `appId` / `externalUserId` inside the JSON body (Cortex style).
    #[default]
    Body,
    /// `appId` / `externalUserId` as URL query parameters (Neutron style).
    Query,
}
