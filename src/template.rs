//! CLI script templates.
//!
//! A template is plain text containing bracketed placeholders. Only
//! `[TENANT_NAME]`, `[TRUNK_FQDN]` and `[CAC_LIMIT]` are ever substituted.
//! They match without regard to case and every occurrence is replaced. Any
//! other bracketed text passes through unchanged.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("{path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

lazy_static! {
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"(?i)\[(TENANT_NAME|TRUNK_FQDN|CAC_LIMIT)\]").unwrap();
}

/// Values substituted into a tenant provisioning script
#[derive(Clone, Debug, Default)]
pub struct TenantFields {
    pub tenant_name: String,
    pub trunk_fqdn: String,
    pub cac_limit: String,
}

impl TenantFields {
    /// `name` is the placeholder text between the brackets, in any case
    fn value(&self, name: &str) -> &str {
        if name.eq_ignore_ascii_case("TENANT_NAME") {
            &self.tenant_name
        } else if name.eq_ignore_ascii_case("TRUNK_FQDN") {
            &self.trunk_fqdn
        } else {
            &self.cac_limit
        }
    }
}

/// Substitute every recognised placeholder in `template` in a single pass.
///
/// Field values are inserted literally, so `$` or placeholders inside a
/// value are never re-interpreted.
pub fn render(template: &str, fields: &TenantFields) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| fields.value(&caps[1]).to_string())
        .into_owned()
}

/// Read-only access to the template files on disk
#[derive(Clone, Debug)]
pub struct TemplateStore {
    new_tenant: PathBuf,
}

impl TemplateStore {
    pub fn new(new_tenant: impl Into<PathBuf>) -> Self {
        Self {
            new_tenant: new_tenant.into(),
        }
    }

    /// Load the tenant provisioning template
    pub async fn load_new_tenant(&self) -> Result<String, TemplateError> {
        load(&self.new_tenant).await
    }
}

pub async fn load(path: &Path) -> Result<String, TemplateError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Unreadable {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn acme() -> TenantFields {
        TenantFields {
            tenant_name: "acme".into(),
            trunk_fqdn: "acme.sbc.test".into(),
            cac_limit: "10".into(),
        }
    }

    #[test]
    fn renders_all_placeholders() {
        let out = render(
            "set tenant [TENANT_NAME] cac [CAC_LIMIT] trunk [TRUNK_FQDN]",
            &acme(),
        );
        assert_eq!(out, "set tenant acme cac 10 trunk acme.sbc.test");
    }

    #[test]
    fn matches_case_insensitively_and_repeatedly() {
        let out = render(
            "[tenant_name] [Tenant_Name] [TENANT_NAME]\n[cac_limit]/[Trunk_Fqdn]",
            &acme(),
        );
        assert_eq!(out, "acme acme acme\n10/acme.sbc.test");
    }

    #[test]
    fn unknown_tokens_are_left_alone() {
        let out = render("[TENANT_ID] [TENANT_NAME_2] [REGION] [TENANT_NAME]", &acme());
        assert_eq!(out, "[TENANT_ID] [TENANT_NAME_2] [REGION] acme");
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let text = "configure voip\n ip-group new\n  name \"[OTHER]\"\nexit\n";
        assert_eq!(render(text, &acme()), text);
        assert_eq!(render(&render(text, &acme()), &acme()), text);
    }

    #[test]
    fn values_are_inserted_literally() {
        let fields = TenantFields {
            tenant_name: "$1 [CAC_LIMIT]".into(),
            trunk_fqdn: "[TENANT_NAME]".into(),
            cac_limit: "5".into(),
        };
        assert_eq!(render("[TENANT_NAME]", &fields), "$1 [CAC_LIMIT]");
        assert_eq!(
            render("[TRUNK_FQDN]-[CAC_LIMIT]", &fields),
            "[TENANT_NAME]-5"
        );
    }

    #[tokio::test]
    async fn loads_template_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tenant [TENANT_NAME]").unwrap();

        let store = TemplateStore::new(file.path());
        let text = store.load_new_tenant().await.unwrap();
        assert_eq!(text, "tenant [TENANT_NAME]");
    }

    #[tokio::test]
    async fn missing_template_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("missing.txt"));
        let err = store.load_new_tenant().await.unwrap_err();
        assert!(matches!(err, TemplateError::Unreadable { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }
}
