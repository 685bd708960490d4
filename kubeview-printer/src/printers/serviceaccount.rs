use k8s_openapi::api::core::v1::{Secret, ServiceAccount};
use k8s_openapi::List;

use super::format::link_list;
use super::object::Object;
use super::printer::{list_table, require, PrintHandler};
use super::Options;
use crate::component::{Component, Link, Summary, TableRow};
use crate::error::{PrintError, ResultExt};
use crate::store::Key;
use crate::utils::{age, dynamic_to_typed, labels};

const SERVICE_ACCOUNT_NAME_ANNOTATION: &str = "kubernetes.io/service-account.name";
const SERVICE_ACCOUNT_TOKEN_TYPE: &str = "kubernetes.io/service-account-token";

#[derive(Debug, Clone, Default)]
pub struct ServiceAccountListPrinter;

impl PrintHandler for ServiceAccountListPrinter {
    type Object = List<ServiceAccount>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<ServiceAccount>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "service account list")?;
        let columns = ["Name", "Labels", "Secrets", "Age"];
        list_table("Service Accounts", "We couldn't find any service accounts!", &columns, &list.items, |sa| {
            let secrets = sa.secrets.as_ref().map(Vec::len).unwrap_or(0);
            Ok(TableRow::new()
                .with("Name", options.object_link(sa))
                .with("Labels", labels(&sa.metadata))
                .with("Secrets", Component::text(secrets.to_string()))
                .with("Age", age(&sa.metadata)))
        })
    }
}

fn secret_link(name: &str, namespace: Option<&str>, options: &Options) -> Result<Link, PrintError> {
    options
        .link
        .for_object("v1", "Secret", name, namespace, name)
        .context(format!("link secret {name}"))
}

/// Token secrets in the object store that belong to `sa`.
fn token_secrets(sa: &ServiceAccount, options: &Options) -> Result<Vec<Secret>, PrintError> {
    let name = sa.metadata.name.as_deref().unwrap_or_default();
    let key = Key::new("v1", "Secret").namespace(sa.metadata.namespace.as_deref());

    let mut tokens = Vec::new();
    for obj in options.object_store().list(&key).context("list secrets")? {
        let secret: Secret = dynamic_to_typed(&obj)?;
        let owner = secret
            .metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(SERVICE_ACCOUNT_NAME_ANNOTATION));
        if secret.type_.as_deref() == Some(SERVICE_ACCOUNT_TOKEN_TYPE) && owner.map(String::as_str) == Some(name) {
            tokens.push(secret);
        }
    }
    Ok(tokens)
}

#[derive(Debug, Clone, Default)]
pub struct ServiceAccountPrinter;

impl PrintHandler for ServiceAccountPrinter {
    type Object = ServiceAccount;

    #[tracing::instrument(skip_all, fields(name = ?sa.map(|s| &s.metadata.name)))]
    fn print(&self, sa: Option<&ServiceAccount>, options: &Options) -> Result<Component, PrintError> {
        let sa = require(sa, "service account")?;
        let namespace = sa.metadata.namespace.as_deref();
        let mut object = Object::new(sa)?;

        let pull_secrets = sa
            .image_pull_secrets
            .iter()
            .flatten()
            .map(|s| secret_link(&s.name, namespace, options))
            .collect::<Result<Vec<_>, _>>()?;
        let mountable = sa
            .secrets
            .iter()
            .flatten()
            .filter_map(|s| s.name.as_deref())
            .map(|name| secret_link(name, namespace, options))
            .collect::<Result<Vec<_>, _>>()?;
        let tokens = token_secrets(sa, options)?
            .iter()
            .filter_map(|s| s.metadata.name.as_deref())
            .map(|name| secret_link(name, namespace, options))
            .collect::<Result<Vec<_>, _>>()?;

        let mut config = Summary::new("Configuration");
        config.add("Image Pull Secrets", link_list(pull_secrets));
        config.add("Mountable Secrets", link_list(mountable));
        config.add("Tokens", link_list(tokens));
        object.register_config(config);

        object.to_component(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::testing::{dynamic, options, options_with_store, typed};
    use crate::store::MemoryStore;
    use k8s_openapi::serde_json::json;

    fn service_account() -> ServiceAccount {
        typed(json!({
            "apiVersion": "v1",
            "kind": "ServiceAccount",
            "metadata": {"name": "builder", "namespace": "ci"},
            "secrets": [{"name": "builder-token"}, {"name": "registry"}],
            "imagePullSecrets": [{"name": "registry"}]
        }))
    }

    fn token(name: &str, account: &str) -> kube::api::DynamicObject {
        dynamic(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "type": "kubernetes.io/service-account-token",
            "metadata": {
                "name": name,
                "namespace": "ci",
                "annotations": {"kubernetes.io/service-account.name": account}
            }
        }))
    }

    #[test]
    fn test_nil_list() {
        assert!(ServiceAccountListPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_nil_object() {
        assert!(ServiceAccountPrinter.print(None, &options()).is_err());
    }

    #[test]
    fn test_list() {
        let list = List {
            items: vec![service_account()],
            metadata: Default::default(),
        };
        let component = ServiceAccountListPrinter.print(Some(&list), &options()).unwrap();
        let row = &component.as_table().unwrap().rows[0];
        assert_eq!(row.get("Secrets"), Some(&Component::text("2")));
    }

    #[test]
    fn test_object_with_tokens() {
        let store = MemoryStore::new();
        store.insert(token("builder-token", "builder")).unwrap();
        store.insert(token("deployer-token", "deployer")).unwrap();

        let component = ServiceAccountPrinter
            .print(Some(&service_account()), &options_with_store(store))
            .unwrap();
        let config = component
            .as_flex_layout()
            .unwrap()
            .find_summary("Configuration")
            .unwrap()
            .clone();

        let pull = config.section("Image Pull Secrets").unwrap().as_link().unwrap();
        assert_eq!(
            pull.reference,
            "/overview/namespace/ci/config-and-storage/secrets/registry"
        );
        assert_eq!(
            config.section("Mountable Secrets"),
            Some(&Component::markdown(
                "[builder-token](/overview/namespace/ci/config-and-storage/secrets/builder-token), \
                 [registry](/overview/namespace/ci/config-and-storage/secrets/registry)"
            ))
        );
        assert_eq!(config.section("Tokens").unwrap().as_link().unwrap().text, "builder-token");
    }

    #[test]
    fn test_object_without_secrets() {
        let sa: ServiceAccount = typed(json!({
            "apiVersion": "v1",
            "kind": "ServiceAccount",
            "metadata": {"name": "default", "namespace": "ci"}
        }));
        let component = ServiceAccountPrinter.print(Some(&sa), &options()).unwrap();
        let layout = component.as_flex_layout().unwrap();
        let config = layout.find_summary("Configuration").unwrap();
        assert_eq!(config.section("Tokens"), Some(&Component::text("<none>")));
    }
}
