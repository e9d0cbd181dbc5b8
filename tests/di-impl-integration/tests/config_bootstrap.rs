//! 配置驱动的开放泛型注册测试

use anyhow::Result;
use di_abstractions::ServiceRegistry;
use di_impl::{ServiceCollection, TypeCatalog};
use pretty_assertions::assert_eq;
use registration_common::{InfrastructureError, Lifetime, RegistrationError, TypeBuilder};
use registration_composition::{RegistrationBootstrapper, SettingsLoader};
use std::io::Write;
use tempfile::NamedTempFile;

fn catalog() -> TypeCatalog {
    let handler = TypeBuilder::interface("billing::Handler").generic_parameters(["T"]).build();
    let validator = TypeBuilder::interface("billing::Validator").generic_parameters(["T"]).build();
    let invoice = TypeBuilder::class("billing::Invoice").build();
    let order = TypeBuilder::class("billing::Order").build();

    TypeCatalog::new("billing")
        .with_type(handler.clone())
        .with_type(validator.clone())
        .with_type(
            TypeBuilder::class("billing::InvoiceHandler")
                .implements(handler.close(&[invoice.clone()]).unwrap())
                .build(),
        )
        .with_type(
            TypeBuilder::class("billing::OrderHandler")
                .implements(handler.close(&[order.clone()]).unwrap())
                .build(),
        )
        .with_type(
            TypeBuilder::class("billing::InvoiceValidator")
                .implements(validator.close(&[invoice]).unwrap())
                .build(),
        )
        .with_type(
            TypeBuilder::class("billing::StrictInvoiceValidator")
                .internal()
                .implements(validator.close(&[order]).unwrap())
                .build(),
        )
}

fn settings_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_bootstrap_from_toml_file() -> Result<()> {
    let file = settings_file(
        r#"
[logging]
level = "debug"

[[registrations]]
service = "Handler"

[[registrations]]
service = "billing::Validator<T>"
lifetime = "singleton"
accessibility = "public_only"
"#,
    )?;
    let settings = SettingsLoader::new().without_env().with_file(file.path()).load()?;
    let catalog = catalog();
    let mut services = ServiceCollection::new();

    let report = RegistrationBootstrapper::new(&catalog).bootstrap(&settings, &mut services)?;

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.total_groups(), 3);
    let registered: Vec<(String, Lifetime)> = services
        .descriptors()
        .iter()
        .map(|d| (d.service_type.to_string(), d.lifetime))
        .collect();
    assert_eq!(
        registered,
        vec![
            ("billing::Handler<billing::Invoice>".to_string(), Lifetime::Transient),
            ("billing::Handler<billing::Order>".to_string(), Lifetime::Transient),
            ("billing::Validator<billing::Invoice>".to_string(), Lifetime::Singleton),
        ]
    );
    Ok(())
}

#[test]
fn test_failed_registration_stops_bootstrap() -> Result<()> {
    let settings = SettingsLoader::from_toml_str(
        r#"
[[registrations]]
service = "Handler"
implementations = ["InvoiceHandler"]

[[registrations]]
service = "Validator"
implementations = ["InvoiceHandler"]

[[registrations]]
service = "Handler"
implementations = ["OrderHandler"]
"#,
    )?;
    let catalog = catalog();
    let mut services = ServiceCollection::new();

    let err = RegistrationBootstrapper::new(&catalog)
        .bootstrap(&settings, &mut services)
        .unwrap_err();

    assert!(matches!(
        err,
        InfrastructureError::RegistrationError {
            source: RegistrationError::UnrelatedImplementation { .. }
        }
    ));
    assert_eq!(services.len(), 1);
    let order_handler = catalog.resolve("OrderHandler").unwrap();
    assert!(!services.is_registered(&order_handler.interfaces()[0]));
    Ok(())
}

#[test]
fn test_invalid_accessibility_in_file() -> Result<()> {
    let file = settings_file("[[registrations]]\nservice = \"Handler\"\naccessibility = \"friends\"\n")?;
    let settings = SettingsLoader::new().without_env().with_file(file.path()).load()?;
    let catalog = catalog();

    let err = RegistrationBootstrapper::new(&catalog)
        .bootstrap(&settings, &mut ServiceCollection::new())
        .unwrap_err();

    assert!(err.to_string().contains("friends"));
    Ok(())
}
