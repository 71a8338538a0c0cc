//! Keystroke-by-keystroke behavior of a card form, driven through the public
//! API the way a host text field would.

use cardform_core::{
    card_number, classify, CardForm, CardType, FieldStatus, FixedClock, FormConfig,
    MatchedBy, ReferenceDate,
};

const JUNE_2024: ReferenceDate = ReferenceDate::new(6, 2024);

fn new_form(config: FormConfig) -> CardForm<FixedClock> {
    CardForm::with_clock(config, FixedClock(JUNE_2024))
}

fn type_into<F: FnMut(&str)>(text: &str, mut apply: F) {
    let mut typed = String::new();
    for c in text.chars() {
        typed.push(c);
        apply(&typed);
    }
}

#[test]
fn test_typing_amex_reports_each_network_once() {
    let mut form = new_form(FormConfig::default());
    let mut changes = Vec::new();

    type_into("378282246310005", |typed| {
        if let Some(change) = form.set_card_number(typed) {
            changes.push(change.card_type);
        }
    });

    assert_eq!(changes, vec![CardType::Unknown, CardType::Amex]);
    assert!(form.card_number().is_complete());
    assert_eq!(form.statuses().card_number, Some(FieldStatus::Valid));
}

#[test]
fn test_typing_past_max_length_is_capped() {
    let mut form = new_form(FormConfig::default());
    type_into("41111111111111119999", |typed| {
        form.set_card_number(typed);
    });
    assert_eq!(form.card_number().text(), "4111111111111111");
    assert!(form.card_number().is_valid());
}

#[test]
fn test_maestro_partial_prefix_resolves_as_digits_arrive() {
    let steps: Vec<(String, CardType, MatchedBy)> = ["6", "63", "630", "6304"]
        .iter()
        .map(|s| {
            let c = classify(s);
            (s.to_string(), c.card_type, c.matched_by)
        })
        .collect();

    assert_eq!(steps[0].1, CardType::Maestro);
    assert_eq!(steps[0].2, MatchedBy::RelaxedPrefix);
    assert_eq!(steps[2].2, MatchedBy::RelaxedPrefix);
    assert_eq!(steps[3].2, MatchedBy::Pattern);
}

#[test]
fn test_expiration_typing_with_leading_zero() {
    let mut form = new_form(FormConfig::default());
    type_into("928", |typed| {
        // The host feeds back the text it displays, which includes the padding.
        let current = form.expiration().text().to_string();
        let next = if typed.len() == 1 {
            typed.to_string()
        } else {
            format!("{current}{}", &typed[typed.len() - 1..])
        };
        form.set_expiration(&next);
    });
    assert_eq!(form.expiration().text(), "0928");
    assert_eq!(form.expiration_display(), "09/28");
    assert!(form.expiration().should_advance(JUNE_2024));
}

#[test]
fn test_full_form_lifecycle() {
    let config = FormConfig::from_toml_str(
        r#"
        security_code = "required"
        mask_card_number = true
        "#,
    )
    .unwrap();
    let mut form = new_form(config);

    form.set_card_number("6011111111111117");
    form.set_expiration("0630");
    form.set_security_code("1234");

    assert_eq!(form.security_code().text(), "123");
    assert!(form.is_valid());
    assert_eq!(form.card_number_display(false), "•••• •••• •••• 1117");
    assert!(card_number::is_valid(
        form.card_number().text(),
        form.card_number().network()
    ));
}
