//! Bindings to the Stripe.js embedded script.
//!
//! The script is loaded from a `<script>` tag in the page shell and installs
//! a global `Stripe` constructor. The hosted card element it renders exposes
//! only a narrow contract: mount into a node, emit `change` events, and be
//! consumed by `confirmCardPayment`. All conversions to and from JS objects
//! happen here so the rest of the crate stays on `serde_json::Value`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    /// Processor client handle returned by the global constructor.
    pub type StripeClient;

    #[wasm_bindgen(js_name = Stripe, catch)]
    fn stripe_constructor(publishable_key: &str) -> Result<StripeClient, JsValue>;

    #[wasm_bindgen(method)]
    fn elements(this: &StripeClient) -> Elements;

    #[wasm_bindgen(method, js_name = confirmCardPayment)]
    fn confirm_card_payment_js(
        this: &StripeClient,
        client_secret: &str,
        data: &JsValue,
    ) -> js_sys::Promise;

    /// Factory for hosted input elements.
    pub type Elements;

    #[wasm_bindgen(method)]
    fn create(this: &Elements, element_type: &str, options: &JsValue) -> CardElement;

    /// Exclusive handle to the hosted card input.
    pub type CardElement;

    #[wasm_bindgen(method)]
    fn mount(this: &CardElement, node: &web_sys::Element);

    #[wasm_bindgen(method)]
    fn on(this: &CardElement, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn unmount(this: &CardElement);
}

/// How long to wait for the embedded script's global to appear.
const LOAD_ATTEMPTS: u32 = 50;
const LOAD_POLL_MS: u64 = 100;

/// Initialize the processor client, suspending until the embedded script has
/// installed its global constructor.
///
/// # Errors
///
/// Returns `Err` if the script never loads or the constructor rejects the
/// publishable key.
pub async fn load(publishable_key: &str) -> Result<StripeClient, JsValue> {
    for _ in 0..LOAD_ATTEMPTS {
        if js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Stripe")).unwrap_or(false) {
            return stripe_constructor(publishable_key);
        }
        gloo_timers::future::sleep(std::time::Duration::from_millis(LOAD_POLL_MS)).await;
    }
    Err(JsValue::from_str("payment script did not load"))
}

/// Create the hosted card element with the given style options and mount it
/// into `node`. The caller owns the returned handle exclusively.
pub fn create_card_element(
    client: &StripeClient,
    style: &serde_json::Value,
    node: &web_sys::Element,
) -> CardElement {
    let options = json_to_js(&serde_json::json!({ "style": style }));
    let card = client.elements().create("card", &options);
    card.mount(node);
    card
}

/// Register the change listener on the hosted element.
///
/// The returned closure must be kept alive for as long as the element is
/// mounted; dropping it detaches the handler.
pub fn on_change(
    card: &CardElement,
    mut handler: impl FnMut(serde_json::Value) + 'static,
) -> Closure<dyn FnMut(JsValue)> {
    let closure = Closure::new(move |event: JsValue| {
        if let Some(value) = js_to_json(&event) {
            handler(value);
        }
    });
    card.on("change", closure.as_ref().unchecked_ref());
    closure
}

/// Release the hosted element.
pub fn release(card: &CardElement) {
    card.unmount();
}

/// Run the confirmation round trip for a server-created charge.
///
/// Suspends for the processor's network exchange. Returns the charge record
/// on success, or the processor's error message on failure. No timeout and
/// no retry; each call is one-shot per token.
pub async fn confirm_card_payment(
    client: &StripeClient,
    card: &CardElement,
    client_secret: &str,
) -> Result<serde_json::Value, String> {
    let payment_method = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&payment_method, &JsValue::from_str("card"), card.as_ref());
    let data = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&data, &JsValue::from_str("payment_method"), &payment_method);

    let result = JsFuture::from(client.confirm_card_payment_js(client_secret, &data))
        .await
        .map_err(|e| error_message(&e))?;

    let error = js_sys::Reflect::get(&result, &JsValue::from_str("error"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null());
    if let Some(error) = error {
        return Err(error_message(&error));
    }

    let intent = js_sys::Reflect::get(&result, &JsValue::from_str("paymentIntent"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| js_to_json(&v))
        .unwrap_or(serde_json::Value::Null);
    Ok(intent)
}

/// Best-effort `message` extraction from a processor error object.
fn error_message(error: &JsValue) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| "Payment failed".to_owned())
}

/// Convert a JS object to `serde_json::Value` via JSON stringification.
fn js_to_json(value: &JsValue) -> Option<serde_json::Value> {
    let text = js_sys::JSON::stringify(value).ok()?;
    serde_json::from_str(&String::from(text)).ok()
}

/// Convert a `serde_json::Value` to a JS object via JSON parsing.
fn json_to_js(value: &serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::UNDEFINED)
}
