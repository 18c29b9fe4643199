//! Storefront page enhancement - browser workload.
//!
//! Every storefront page loads this module. On start it:
//! - Reads the optional JSON configuration block
//! - Waits for the document to finish parsing
//! - Installs the interaction behaviors once
//!
//! `formatCurrency` and `showNotification` are exported from the module and
//! also set on `window`, where inline page scripts call them.

mod console;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use turbo_interactions::config::NotificationConfig;
use turbo_interactions::{InteractionConfig, Notifier, Severity, Storefront, WebDom};
use turbo_observability::{LogFormat, LogLevel, StructuredLogger};

use console::ConsoleSink;

const WORKLOAD: &str = "storefront-enhance";

/// Id of the `<script type="application/json">` block holding overrides.
const CONFIG_ELEMENT_ID: &str = "turbo-interactions-config";

thread_local! {
    static STOREFRONT: RefCell<Option<Storefront<WebDom>>> = const { RefCell::new(None) };
}

/// Module entry point, run by the wasm-bindgen glue on load.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let dom = WebDom::new()
        .ok_or_else(|| JsValue::from_str("storefront-enhance needs a browser document"))?;
    let logger = page_logger();
    expose_globals()?;

    if dom.document().ready_state() == "loading" {
        let document = dom.document().clone();
        let on_ready = Closure::once_into_js(move || install(dom, &logger));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        install(dom, &logger);
    }

    Ok(())
}

/// Format a dollar amount the way the storefront displays prices.
#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(amount: f64) -> String {
    turbo_interactions::format_currency(amount)
}

/// Show a toast. `kind` is `success` (default), `error`, `info` or
/// `warning`; anything else is shown as `info`.
///
/// Returns false when the page has no body to show it on.
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) -> bool {
    let logger = page_logger();
    let severity = severity_for(kind.as_deref(), &logger);

    let shown = STOREFRONT.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|storefront| storefront.notify(message, severity).is_some())
    });
    match shown {
        Some(shown) => shown,
        // Called before the document finished parsing.
        None => WebDom::new()
            .and_then(|dom| {
                Notifier::new(Rc::new(dom), NotificationConfig::default(), &logger)
                    .notify(message, severity)
            })
            .is_some(),
    }
}

/// Set `window.formatCurrency` and `window.showNotification`.
///
/// Amounts are coerced with `Number(amount)` and messages must be strings;
/// a missing or non-string `kind` takes the default severity.
fn expose_globals() -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };

    let format = Closure::<dyn Fn(JsValue) -> String>::new(|amount: JsValue| {
        format_currency(js_sys::Number::new(&amount).value_of())
    });
    Reflect::set(&window, &JsValue::from_str("formatCurrency"), format.as_ref())?;
    format.forget();

    let notify = Closure::<dyn Fn(JsValue, JsValue) -> bool>::new(
        |message: JsValue, kind: JsValue| {
            let message = message.as_string().unwrap_or_default();
            show_notification(&message, kind.as_string())
        },
    );
    Reflect::set(&window, &JsValue::from_str("showNotification"), notify.as_ref())?;
    notify.forget();

    Ok(())
}

/// `None` is the default severity; unknown names show as info.
fn severity_for(kind: Option<&str>, logger: &StructuredLogger) -> Severity {
    let Some(kind) = kind else {
        return Severity::default();
    };
    kind.parse().unwrap_or_else(|_| {
        logger
            .warn_builder("Unknown notification type, showing as info")
            .field("type", kind)
            .emit();
        Severity::Info
    })
}

fn install(dom: WebDom, logger: &StructuredLogger) {
    let config = read_config(dom.document(), logger);
    let storefront = Storefront::install(Rc::new(dom), config, logger);
    STOREFRONT.with(|slot| *slot.borrow_mut() = Some(storefront));
}

fn read_config(document: &Document, logger: &StructuredLogger) -> InteractionConfig {
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return InteractionConfig::default();
    };
    let json = block.text_content().unwrap_or_default();
    match InteractionConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            logger
                .error_builder("Invalid interaction config, using defaults")
                .field("error", err.to_string())
                .emit();
            InteractionConfig::default()
        }
    }
}

fn page_logger() -> StructuredLogger {
    let window = web_sys::window();
    let page = window
        .as_ref()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());

    let logger = StructuredLogger::new(page)
        .with_workload(WORKLOAD)
        .with_min_level(LogLevel::Info)
        .with_format(LogFormat::Human)
        .with_sink(Rc::new(ConsoleSink));

    match window.and_then(|w| w.performance()) {
        Some(performance) => logger.with_clock(Rc::new(move || performance.now())),
        None => logger,
    }
}
