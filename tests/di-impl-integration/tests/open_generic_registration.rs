//! 开放泛型批量注册的跨 crate 行为测试

use di_abstractions::{CandidateSource, RegistrationMode};
use di_impl::{
    group_by_service_type, register_many_for_open_generic_types_with,
    register_many_for_open_generic_with, CancellationToken, OpenGenericBatch,
    OpenGenericRegistrationExt, ServiceCollection, TypeCatalog,
};
use pretty_assertions::assert_eq;
use registration_common::{AccessibilityOption, RegistrationError, RegistrationResult, TypeBuilder, TypeInfo};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// `Handler<T>` 场景：两个 `Handler<Invoice>` 实现和一个 `Handler<Order>` 实现
struct Billing {
    handler: Arc<TypeInfo>,
    validator: Arc<TypeInfo>,
    invoice: Arc<TypeInfo>,
    shipment: Arc<TypeInfo>,
    invoice_handler: Arc<TypeInfo>,
    credit_card_handler: Arc<TypeInfo>,
    order_handler: Arc<TypeInfo>,
}

impl Billing {
    fn new() -> Self {
        init_test_logger();

        let handler = TypeBuilder::interface("Handler").generic_parameters(["T"]).build();
        let validator = TypeBuilder::interface("Validator").generic_parameters(["T"]).build();
        let invoice = TypeBuilder::class("Invoice").build();
        let order = TypeBuilder::class("Order").build();
        let shipment = TypeBuilder::class("Shipment").build();
        let handles_invoice = handler.close(&[invoice.clone()]).unwrap();

        Self {
            invoice_handler: TypeBuilder::class("InvoiceHandler")
                .implements(handles_invoice.clone())
                .build(),
            credit_card_handler: TypeBuilder::class("CreditCardHandler")
                .implements(handles_invoice)
                .build(),
            order_handler: TypeBuilder::class("OrderHandler")
                .implements(handler.close(&[order]).unwrap())
                .build(),
            handler,
            validator,
            invoice,
            shipment,
        }
    }

    fn candidates(&self) -> Vec<Arc<TypeInfo>> {
        vec![
            self.invoice_handler.clone(),
            self.credit_card_handler.clone(),
            self.order_handler.clone(),
        ]
    }

    fn catalog(&self) -> TypeCatalog {
        let mut catalog = TypeCatalog::new("billing");
        catalog.extend(self.candidates());
        catalog
    }
}

type Calls = Vec<(String, Vec<String>)>;

fn record(calls: &mut Calls) -> impl FnMut(&Arc<TypeInfo>, &[Arc<TypeInfo>]) -> RegistrationResult<()> + '_ {
    move |service, implementations| {
        calls.push((
            service.to_string(),
            implementations.iter().map(ToString::to_string).collect(),
        ));
        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn test_single_implementation_conflict_lists_every_implementation() {
    let billing = Billing::new();
    let mut calls = Calls::new();

    let err = OpenGenericBatch::new()
        .open_generic(billing.handler.clone())
        .types(billing.candidates())
        .registrar(record(&mut calls))
        .execute()
        .unwrap_err();

    match err {
        RegistrationError::MultipleImplementations {
            service_type,
            implementations,
        } => {
            assert_eq!(service_type, "Handler<Invoice>");
            assert_eq!(implementations, "InvoiceHandler, CreditCardHandler");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(calls.is_empty(), "冲突检查必须先于任何回调");
}

#[test]
fn test_allow_multiple_dispatches_groups_in_candidate_order() {
    let billing = Billing::new();
    let mut calls = Calls::new();

    let summary = register_many_for_open_generic_types_with(
        &billing.handler,
        record(&mut calls),
        &billing.candidates(),
    )
    .unwrap();

    assert_eq!(summary.groups, 2);
    assert_eq!(summary.implementations, 3);
    assert_eq!(
        calls,
        vec![
            ("Handler<Invoice>".to_string(), strings(&["InvoiceHandler", "CreditCardHandler"])),
            ("Handler<Order>".to_string(), strings(&["OrderHandler"])),
        ]
    );
}

#[test]
fn test_scanning_overload_matches_explicit_overload() {
    let billing = Billing::new();
    let catalog = billing.catalog();
    let mut scanned = Calls::new();
    let mut explicit = Calls::new();

    register_many_for_open_generic_with(
        &billing.handler,
        record(&mut scanned),
        AccessibilityOption::AllTypes,
        &[&catalog as &dyn CandidateSource],
    )
    .unwrap();
    register_many_for_open_generic_types_with(&billing.handler, record(&mut explicit), &billing.candidates()).unwrap();

    assert_eq!(scanned, explicit);
}

#[test]
fn test_grouping_is_deterministic() {
    let billing = Billing::new();
    let candidates = billing.candidates();

    let first = group_by_service_type(&candidates, &billing.handler);
    for _ in 0..10 {
        assert_eq!(group_by_service_type(&candidates, &billing.handler), first);
    }
}

#[test]
fn test_candidate_with_two_closed_services_appears_in_both_groups() {
    let billing = Billing::new();
    let multi = TypeBuilder::class("InvoiceAndShipmentHandler")
        .implements(billing.handler.close(&[billing.invoice.clone()]).unwrap())
        .implements(billing.handler.close(&[billing.shipment.clone()]).unwrap())
        .build();

    let groups = group_by_service_type(&[multi.clone()], &billing.handler);

    let services: Vec<String> = groups.iter().map(|g| g.service_type.to_string()).collect();
    assert_eq!(services, strings(&["Handler<Invoice>", "Handler<Shipment>"]));
    assert!(groups.iter().all(|g| g.implementations == vec![multi.clone()]));
}

#[test]
fn test_inherited_generic_interface_is_matched() {
    let billing = Billing::new();
    let audited = {
        let builder = TypeBuilder::class("AuditedHandler")
            .abstract_type()
            .generic_parameters(["TMessage"]);
        let message = builder.parameter(0).unwrap();
        builder
            .implements(billing.handler.close(&[message]).unwrap())
            .build()
    };
    let shipment_handler = TypeBuilder::class("ShipmentHandler")
        .extends(audited.close(&[billing.shipment.clone()]).unwrap())
        .build();

    let mut calls = Calls::new();
    register_many_for_open_generic_types_with(&billing.handler, record(&mut calls), &[shipment_handler]).unwrap();

    assert_eq!(calls, vec![("Handler<Shipment>".to_string(), strings(&["ShipmentHandler"]))]);
}

#[test]
fn test_other_generic_definitions_never_match() {
    let billing = Billing::new();
    let invoice_validator = TypeBuilder::class("InvoiceValidator")
        .implements(billing.validator.close(&[billing.invoice.clone()]).unwrap())
        .build();
    let mut catalog = billing.catalog();
    catalog.add(invoice_validator.clone());

    let groups = group_by_service_type(catalog.types(), &billing.handler);
    assert!(groups
        .iter()
        .all(|g| !g.implementations.contains(&invoice_validator)));

    let err = register_many_for_open_generic_types_with(
        &billing.handler,
        record(&mut Calls::new()),
        &[invoice_validator],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::UnrelatedImplementation { ref implementation, .. } if implementation == "InvoiceValidator"
    ));
}

#[test]
fn test_explicit_list_with_distinct_services_registers_each_once() {
    let billing = Billing::new();
    let mut services = ServiceCollection::new();

    services
        .register_many_for_open_generic_types(
            &billing.handler,
            &[billing.invoice_handler.clone(), billing.order_handler.clone()],
        )
        .unwrap();

    let registered: Vec<(String, String)> = services
        .descriptors()
        .iter()
        .map(|d| (d.service_type.to_string(), d.implementations[0].to_string()))
        .collect();
    assert_eq!(
        registered,
        vec![
            ("Handler<Invoice>".to_string(), "InvoiceHandler".to_string()),
            ("Handler<Order>".to_string(), "OrderHandler".to_string()),
        ]
    );
}

#[test]
fn test_closed_definition_fails_first() {
    let billing = Billing::new();
    let closed = billing.handler.close(&[billing.invoice.clone()]).unwrap();

    let err = OpenGenericBatch::new()
        .open_generic(closed)
        .resolved_types([None, Some(TypeBuilder::class("Unrelated").build())])
        .registrar(record(&mut Calls::new()))
        .execute()
        .unwrap_err();

    assert!(matches!(err, RegistrationError::NotOpenGenericType { .. }));
}

#[test]
fn test_callback_failure_stops_dispatch() {
    let billing = Billing::new();
    let mut seen = Vec::new();

    let err = OpenGenericBatch::new()
        .open_generic(billing.handler.clone())
        .types(billing.candidates())
        .mode(RegistrationMode::AllowMultiple)
        .registrar(|service: &Arc<TypeInfo>, _: &[Arc<TypeInfo>]| -> RegistrationResult<()> {
            seen.push(service.to_string());
            Err(RegistrationError::registrar_failed(service.to_string(), "容器拒绝注册"))
        })
        .execute()
        .unwrap_err();

    assert!(matches!(err, RegistrationError::RegistrarFailed { .. }));
    assert_eq!(seen, strings(&["Handler<Invoice>"]));
}

#[test]
fn test_cancelled_batch_dispatches_nothing() {
    let billing = Billing::new();
    let token = CancellationToken::new();
    token.cancel();
    let mut calls = Calls::new();

    let err = OpenGenericBatch::new()
        .open_generic(billing.handler.clone())
        .types(billing.candidates())
        .mode(RegistrationMode::AllowMultiple)
        .cancellation(token)
        .registrar(record(&mut calls))
        .execute()
        .unwrap_err();

    assert!(matches!(err, RegistrationError::Cancelled { dispatched: 0 }));
    assert!(calls.is_empty());
}
