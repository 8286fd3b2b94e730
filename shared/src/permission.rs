//! Permission predicate
//!
//! A role grants access per backend service. Each service carries API grants
//! (`api` path or colon pattern, allowed methods, `allowed` flag). The
//! predicate is fail-closed: missing or malformed data denies.
//!
//! ## Decision order
//! 1. super admin (reserved role name or email) → allow
//! 2. no role / no service entry → deny
//! 3. service found, no path and no method asked → allow
//! 4. otherwise some allowed grant must match both path and method

use crate::models::{ApiPermission, Role, ServicePermission};

/// Role names (lower-cased) that bypass every check
pub const SUPER_ADMIN_ROLE_NAMES: &[&str] = &["super admin", "superadmin"];

/// Reserved super admin login (lower-cased)
pub const SUPER_ADMIN_EMAIL: &str = "superadmin@gmail.com";

/// Lower-case and strip all whitespace: `"User Service"` → `"userservice"`
pub fn normalize_service(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Match a stored API pattern against a concrete path.
///
/// Both sides are split on `/` with empty segments dropped. Segment counts
/// must agree and every pattern segment is either a `:param` wildcard or
/// equal to the path segment.
pub fn match_api_path(pattern: &str, path: &str) -> bool {
    let pattern_parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_parts.len() != path_parts.len() {
        return false;
    }

    pattern_parts
        .iter()
        .zip(path_parts.iter())
        .all(|(pattern, actual)| pattern.starts_with(':') || pattern == actual)
}

/// Whether a role name / email pair is the reserved super admin
pub fn is_super_admin(role_name: Option<&str>, email: Option<&str>) -> bool {
    let role = role_name.unwrap_or_default().trim().to_lowercase();
    let email = email.unwrap_or_default().trim().to_lowercase();
    SUPER_ADMIN_ROLE_NAMES.contains(&role.as_str()) || email == SUPER_ADMIN_EMAIL
}

/// Find a service entry by normalized name
pub fn find_service<'a>(role: &'a Role, service_name: &str) -> Option<&'a ServicePermission> {
    let target = normalize_service(service_name);
    if target.is_empty() {
        return None;
    }
    role.permissions
        .iter()
        .find(|p| normalize_service(&p.service_name) == target)
}

fn grant_matches(grant: &ApiPermission, api: Option<&str>, method: Option<&str>) -> bool {
    if !grant.allowed {
        return false;
    }
    let api_ok = match api {
        Some(api) => grant.api == api || match_api_path(&grant.api, api),
        None => true,
    };
    let method_ok = match method {
        Some(method) => grant.methods.iter().any(|m| m == method),
        None => true,
    };
    api_ok && method_ok
}

/// Decide whether an identity may use `service_name` (optionally a specific
/// `api` path and `method`).
///
/// Empty strings for `api` / `method` count as not supplied.
pub fn has_permission(
    role: Option<&Role>,
    email: Option<&str>,
    service_name: &str,
    api: Option<&str>,
    method: Option<&str>,
) -> bool {
    if is_super_admin(role.map(|r| r.name.as_str()), email) {
        return true;
    }

    let Some(role) = role else {
        return false;
    };
    let Some(service) = find_service(role, service_name) else {
        return false;
    };

    let api = api.filter(|s| !s.is_empty());
    let method = method.filter(|s| !s.is_empty());
    if api.is_none() && method.is_none() {
        return true;
    }

    service
        .api_permissions
        .iter()
        .any(|grant| grant_matches(grant, api, method))
}
