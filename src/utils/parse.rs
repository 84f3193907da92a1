/// Splits free-text store info on the first comma into (store name, area).
/// No comma means the whole text is the store name and the area stays empty;
/// that is a lenient default, not an error.
pub fn split_store_info(text: &str) -> (String, String) {
    match text.split_once(',') {
        Some((name, area)) => (name.trim().to_string(), area.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

/// Parsed check-out report. Every field defaults to `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub bertemu: String,
    pub order: String,
    pub tagihan: String,
    pub kendala: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        CheckoutForm {
            bertemu: "-".to_string(),
            order: "-".to_string(),
            tagihan: "-".to_string(),
            kendala: "-".to_string(),
        }
    }
}

/// Parses `key: value` lines with the keys bertemu/order/tagihan/kendala,
/// case-insensitive. Unrecognized lines are skipped. Returns `None` when no
/// recognized key is present at all.
pub fn parse_checkout_form(text: &str) -> Option<CheckoutForm> {
    let mut form = CheckoutForm::default();
    let mut matched = false;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        let value = if value.is_empty() { "-" } else { value };
        match key.trim().to_lowercase().as_str() {
            "bertemu" => {
                form.bertemu = value.to_string();
                matched = true;
            }
            "order" => {
                form.order = value.to_string();
                matched = true;
            }
            "tagihan" => {
                form.tagihan = value.to_string();
                matched = true;
            }
            "kendala" => {
                form.kendala = value.to_string();
                matched = true;
            }
            _ => {}
        }
    }

    matched.then_some(form)
}
