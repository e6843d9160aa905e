use axum::http::{header, HeaderMap};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::validate_jwt;
use crate::config::AppConfig;
use crate::context::{merge_modules, AgentContext, AgentProfile, AgentRole, TenantContext};
use crate::database::IdentityStore;
use crate::error::AccessError;

const FORWARDED_HOST: &str = "x-forwarded-host";

/// Derives tenant and agent contexts from request metadata.
pub struct ContextResolver {
    identity: Arc<dyn IdentityStore>,
    jwt_secret: String,
    dev_domain: Option<String>,
}

impl ContextResolver {
    pub fn new(identity: Arc<dyn IdentityStore>, config: &AppConfig) -> Self {
        Self {
            identity,
            jwt_secret: config.security.jwt_secret.clone(),
            dev_domain: config.tenancy.dev_domain.clone(),
        }
    }

    /// Map the request host to an active tenant.
    pub async fn resolve_tenant(&self, headers: &HeaderMap) -> Result<TenantContext, AccessError> {
        let domain = self.request_domain(headers)?;

        let tenant = self
            .identity
            .tenant_by_domain(&domain)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| {
                warn!("Tenant resolution failed: no active tenant for '{}'", domain);
                AccessError::TenantNotFound(domain.clone())
            })?;

        debug!("Resolved tenant {} ({})", tenant.name, tenant.id);

        Ok(TenantContext {
            tenant_id: tenant.id,
            domain,
            name: tenant.name,
        })
    }

    /// Resolve the tenant, then the agent behind the bearer token and its modules.
    pub async fn resolve_agent(&self, headers: &HeaderMap) -> Result<AgentContext, AccessError> {
        let tenant = self.resolve_tenant(headers).await?;
        let token = extract_bearer_token(headers)?;

        let claims = validate_jwt(token, &self.jwt_secret)
            .map_err(|e| AccessError::unauthenticated(e.to_string()))?;

        if claims.tenant_id != tenant.tenant_id {
            warn!(
                "Token for tenant '{}' presented on '{}' ({})",
                claims.tenant_id, tenant.domain, tenant.tenant_id
            );
            return Err(AccessError::unauthenticated("Token was not issued for this tenant"));
        }

        let agent = self
            .identity
            .agent(&tenant.tenant_id, &claims.sub)
            .await?
            .filter(|a| a.is_active && a.tenant_id == tenant.tenant_id)
            .ok_or_else(|| {
                warn!("Agent '{}' not found or inactive in tenant '{}'", claims.sub, tenant.tenant_id);
                AccessError::unauthenticated("Agent is not active in this tenant")
            })?;

        // Stored role wins; a token minted for another role is stale
        let stored_role: AgentRole = agent.role.parse().map_err(|e: String| {
            warn!("Agent '{}' has unusable role: {}", agent.id, e);
            AccessError::unauthenticated("Agent role is not recognised")
        })?;
        if stored_role != claims.role {
            warn!(
                "Agent '{}' token role '{}' does not match stored role '{}'",
                agent.id, claims.role, stored_role
            );
            return Err(AccessError::unauthenticated("Agent role mismatch"));
        }

        let modules = merge_modules(self.identity.modules(&tenant.tenant_id, &agent.id).await?);

        debug!(
            "Resolved agent {} ({}) with {} modules in tenant {}",
            agent.full_name,
            stored_role,
            modules.len(),
            tenant.tenant_id
        );

        Ok(AgentContext {
            tenant,
            agent_id: agent.id,
            agent_role: stored_role,
            agent: AgentProfile {
                full_name: agent.full_name,
                email: agent.email,
            },
            modules,
        })
    }

    fn request_domain(&self, headers: &HeaderMap) -> Result<String, AccessError> {
        let raw = headers
            .get(FORWARDED_HOST)
            .or_else(|| headers.get(header::HOST))
            .ok_or_else(|| AccessError::unauthenticated("Missing Host header"))?
            .to_str()
            .map_err(|_| AccessError::unauthenticated("Invalid Host header"))?;

        let domain = normalize_host(raw)
            .ok_or_else(|| AccessError::unauthenticated("Invalid Host header"))?;

        if matches!(domain.as_str(), "localhost" | "127.0.0.1" | "::1") {
            if let Some(dev) = &self.dev_domain {
                return Ok(dev.clone());
            }
        }
        Ok(domain)
    }
}

/// First host of a possibly comma-separated list, lowercased, port removed.
/// Bracketed IPv6 literals come back without their brackets.
fn normalize_host(raw: &str) -> Option<String> {
    let first = raw.split(',').next()?.trim();
    if let Some(rest) = first.strip_prefix('[') {
        let (addr, tail) = rest.split_once(']')?;
        let port_ok = match tail.strip_prefix(':') {
            Some(port) => !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()),
            None => tail.is_empty(),
        };
        let addr = addr.to_ascii_lowercase();
        let valid = port_ok
            && addr.contains(':')
            && addr.chars().all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.');
        return valid.then_some(addr);
    }

    let host = match first.rsplit_once(':') {
        Some((h, port)) if port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => first,
    };
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let valid = !host.is_empty()
        && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    valid.then_some(host)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AccessError> {
    let auth_str = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AccessError::unauthenticated("Missing Authorization header"))?
        .to_str()
        .map_err(|_| AccessError::unauthenticated("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err(AccessError::unauthenticated("Empty bearer token")),
        None => Err(AccessError::unauthenticated("Authorization header must use Bearer token format")),
    }
}
