//! Checkout flow end to end: form, guard and navigation

use minisite_checkout::{
    complete_checkout, CheckoutError, CheckoutForm, CheckoutOutcome, CheckoutProfile,
    CheckoutStep, FormError, Navigator, ProfileField, LEAD_EVENT,
};
use minisite_renderer::RecordingSink;
use serde_json::json;
use url::Url;

#[derive(Default)]
struct RecordingNavigator {
    navigated: Vec<String>,
    acknowledged: Vec<String>,
    rejected: Vec<CheckoutError>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &Url) {
        self.navigated.push(url.to_string());
    }

    fn acknowledge(&mut self, message: &str) {
        self.acknowledged.push(message.to_string());
    }

    fn reject(&mut self, error: &CheckoutError) {
        self.rejected.push(error.clone());
    }
}

fn profile(name: &str) -> CheckoutProfile {
    CheckoutProfile {
        full_name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_ftp_never_navigates() {
    let mut nav = RecordingNavigator::default();
    let result = complete_checkout(
        "ftp://files.example.com/lead",
        &profile("Ana"),
        &mut nav,
        &mut RecordingSink::default(),
    );

    assert!(result.is_err());
    assert!(nav.navigated.is_empty());
    assert!(nav.acknowledged.is_empty());
    assert_eq!(
        nav.rejected,
        vec![CheckoutError::DisallowedScheme {
            scheme: "ftp".to_string()
        }]
    );
}

#[test]
fn test_https_redirect_carries_name() {
    let mut nav = RecordingNavigator::default();
    let outcome = complete_checkout(
        "https://pay.example.com/c",
        &profile("Ana"),
        &mut nav,
        &mut RecordingSink::default(),
    )
    .unwrap();

    assert!(matches!(outcome, CheckoutOutcome::Redirect(_)));
    assert_eq!(nav.navigated, vec!["https://pay.example.com/c?name=Ana".to_string()]);
    let target = Url::parse(&nav.navigated[0]).unwrap();
    assert!(target.query_pairs().any(|(k, v)| k == "name" && v == "Ana"));
}

#[test]
fn test_unsafe_schemes_fail_closed() {
    for target in ["javascript:alert(1)", "data:text/html,x", "file:///etc/passwd", "not a url"] {
        let mut nav = RecordingNavigator::default();
        let mut sink = RecordingSink::default();
        assert!(complete_checkout(target, &profile("Ana"), &mut nav, &mut sink).is_err(), "{}", target);
        assert!(nav.navigated.is_empty(), "{}", target);
        assert_eq!(nav.rejected.len(), 1);
        assert!(sink.events.is_empty(), "{}", target);
    }
}

#[test]
fn test_placeholder_target_acknowledges() {
    let mut nav = RecordingNavigator::default();
    let mut sink = RecordingSink::default();
    let outcome = complete_checkout("#", &profile("Ana"), &mut nav, &mut sink).unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::ThankYou {
            name: "Ana".to_string()
        }
    );
    assert_eq!(
        nav.acknowledged,
        vec!["Thank you Ana! Your registration was received.".to_string()]
    );
    assert!(nav.navigated.is_empty());
    assert_eq!(
        sink.events,
        vec![(LEAD_EVENT.to_string(), json!({ "outcome": "thank_you" }))]
    );
}

#[test]
fn test_full_form_redirects_with_formatted_fields() {
    let mut form = CheckoutForm::new("Course", "R$ 97,00", "https://pay.example.com/c");
    form.set(ProfileField::FullName, "Ana Souza");
    form.set(ProfileField::TaxId, "12345678901");
    form.set(ProfileField::Phone, "11987654321");
    form.set(ProfileField::BirthDate, "1990-04-01");
    assert_eq!(form.advance().unwrap(), CheckoutStep::Address);

    assert!(matches!(form.advance(), Err(FormError::Incomplete { .. })));
    form.set(ProfileField::PostalCode, "01310100");
    form.set(ProfileField::Street, "Av. Paulista");
    form.set(ProfileField::Number, "1000");
    form.set(ProfileField::District, "Bela Vista");
    form.set(ProfileField::City, "São Paulo");
    form.set(ProfileField::State, "SP");
    assert_eq!(form.advance().unwrap(), CheckoutStep::Review);

    let mut nav = RecordingNavigator::default();
    let mut sink = RecordingSink::default();
    form.finish(&mut nav, &mut sink).unwrap();
    assert_eq!(
        sink.events,
        vec![("lead".to_string(), json!({ "outcome": "redirect" }))]
    );

    let target = Url::parse(&nav.navigated[0]).unwrap();
    let pairs: Vec<(String, String)> = target.query_pairs().into_owned().collect();
    assert_eq!(pairs[0], ("name".to_string(), "Ana Souza".to_string()));
    assert!(pairs.contains(&("tax_id".to_string(), "123.456.789-01".to_string())));
    assert!(pairs.contains(&("postal_code".to_string(), "01310-100".to_string())));
    assert!(!pairs.iter().any(|(k, _)| k == "email" || k == "company"));
}

#[test]
fn test_form_rejection_surfaces_guard_error() {
    let mut form = CheckoutForm::new("Course", "", "ftp://x");
    for (field, value) in [
        (ProfileField::FullName, "Ana"),
        (ProfileField::TaxId, "12345678901"),
        (ProfileField::Phone, "11987654321"),
        (ProfileField::BirthDate, "1990-04-01"),
        (ProfileField::PostalCode, "01310100"),
        (ProfileField::Street, "Rua A"),
        (ProfileField::Number, "1"),
        (ProfileField::District, "Centro"),
        (ProfileField::City, "Santos"),
        (ProfileField::State, "SP"),
    ] {
        form.set(field, value);
    }
    form.advance().unwrap();
    form.advance().unwrap();

    let mut nav = RecordingNavigator::default();
    let mut sink = RecordingSink::default();
    assert!(matches!(form.finish(&mut nav, &mut sink), Err(FormError::Checkout(_))));
    assert!(nav.navigated.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn test_profile_wire_names() {
    let json = serde_json::json!({ "nome_completo": "Ana", "telefone": "11" });
    let profile: CheckoutProfile = serde_json::from_value(json).unwrap();
    assert_eq!(profile.full_name, "Ana");
    assert_eq!(profile.phone, "11");
}
