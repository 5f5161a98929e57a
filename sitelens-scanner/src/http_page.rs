//! Static page driver over HTTP.
//!
//! Controls are enumerated from the markup. Activating an anchor follows its `href`,
//! activating a submit control submits the enclosing form, and anything that would
//! need a script engine activates as a no-op (the page stays where it is).

use crate::error::{Result, ScanError};
use crate::html::{attr, element_text, is_hidden, selector};
use crate::model::ElementSignature;
use crate::page::{Lookup, PageDriver};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};
use scraper::{ElementRef, Html};
use std::time::Duration;
use tracing::debug;
use url::Url;

const INTERACTIVE: &str = "button:not([disabled]), \
    a:not([href^='#']):not([href='javascript:void(0)']), \
    [role='button']:not([disabled]), \
    [onclick], \
    input[type='button']:not([disabled]), \
    input[type='submit']:not([disabled]), \
    .btn:not([disabled]), \
    .button:not([disabled])";

const UNNAMED: &str = "Unnamed";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Activation {
    Follow(Url),
    Submit {
        action: Url,
        post: bool,
        fields: Vec<(String, String)>,
    },
    NoOp,
}

/// A control located on the current page, resolved to what activating it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpElement {
    pub signature: ElementSignature,
    activation: Activation,
}

pub struct HttpPage {
    client: Client,
    current: Option<Url>,
    html: String,
}

impl HttpPage {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent("Sitelens/0.1 (https://github.com/trapdoorsec/sitelens)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ScanError::DriverInit(e.to_string()))?;

        Ok(Self {
            client,
            current: None,
            html: String::new(),
        })
    }

    async fn navigate(&mut self, request: RequestBuilder, target: &str) -> Result<String> {
        debug!("Fetching {}", target);

        let navigation_error = |reason: String| ScanError::Navigation {
            url: target.to_string(),
            reason,
        };

        let response = request
            .send()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(navigation_error(format!("HTTP {}", status)));
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        self.current = Some(final_url);
        self.html = body.clone();
        Ok(body)
    }
}

#[async_trait]
impl PageDriver for HttpPage {
    type Handle = HttpElement;

    async fn load(&mut self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| ScanError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let request = self.client.get(parsed);
        self.navigate(request, url).await
    }

    fn current_url(&self) -> String {
        self.current
            .as_ref()
            .map(Url::to_string)
            .unwrap_or_else(|| "about:blank".to_string())
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn links(&mut self) -> Result<Vec<String>> {
        extract_hrefs(&self.html)
    }

    async fn interactive_elements(&mut self) -> Result<Vec<ElementSignature>> {
        enumerate_controls(&self.html)
    }

    async fn find_element(&mut self, signature: &ElementSignature) -> Result<Lookup<HttpElement>> {
        let found = locate(&self.html, self.current.as_ref(), signature)?;
        Ok(match found {
            Some(element) => Lookup::Found(element),
            None => Lookup::NotFound,
        })
    }

    async fn activate(&mut self, handle: &HttpElement) -> Result<()> {
        let to_interaction = |e: ScanError| ScanError::Interaction(e.to_string());

        match &handle.activation {
            Activation::Follow(url) => {
                let request = self.client.get(url.clone());
                self.navigate(request, url.as_str())
                    .await
                    .map_err(to_interaction)?;
            }
            Activation::Submit {
                action,
                post,
                fields,
            } => {
                let request = if *post {
                    let body = url::form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(fields)
                        .finish();
                    self.client
                        .post(action.clone())
                        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                        .body(body)
                } else {
                    let mut url = action.clone();
                    url.set_query(None);
                    url.query_pairs_mut().extend_pairs(fields);
                    self.client.get(url)
                };
                self.navigate(request, action.as_str())
                    .await
                    .map_err(to_interaction)?;
            }
            Activation::NoOp => {
                debug!("{} has no static action; activation is a no-op", handle.signature);
            }
        }
        Ok(())
    }
}

fn extract_hrefs(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector("a[href]")?)
        .filter_map(|a| attr(a, "href"))
        .map(str::to_string)
        .collect())
}

fn control_text(element: ElementRef<'_>) -> String {
    let text = element_text(element);
    if !text.is_empty() {
        return text;
    }
    [attr(element, "value"), attr(element, "aria-label")]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(UNNAMED)
        .to_string()
}

fn control_type(element: ElementRef<'_>) -> String {
    let declared = attr(element, "type").map(str::to_ascii_lowercase);
    match element.value().name() {
        "button" => declared.unwrap_or_else(|| "submit".to_string()),
        "input" => declared.unwrap_or_else(|| "text".to_string()),
        _ => declared.unwrap_or_default(),
    }
}

fn signature_of(element: ElementRef<'_>) -> ElementSignature {
    ElementSignature::new(
        element.value().name(),
        control_text(element),
        control_type(element),
    )
}

fn enumerate_controls(html: &str) -> Result<Vec<ElementSignature>> {
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector(INTERACTIVE)?)
        .filter(|el| !is_hidden(*el))
        .map(signature_of)
        .collect())
}

/// Exact text among the interactive controls first, then any visible element with the
/// same tag whose text contains the signature text.
fn locate(html: &str, base: Option<&Url>, signature: &ElementSignature) -> Result<Option<HttpElement>> {
    let document = Html::parse_document(html);

    let exact = document
        .select(&selector(INTERACTIVE)?)
        .filter(|el| !is_hidden(*el))
        .find(|el| control_text(*el) == signature.text);

    let element = match exact {
        Some(el) => Some(el),
        None => {
            let needle = signature.text.to_lowercase();
            document
                .select(&selector(&signature.tag.to_lowercase())?)
                .filter(|el| !is_hidden(*el))
                .find(|el| element_text(*el).to_lowercase().contains(&needle))
        }
    };

    Ok(element.map(|el| HttpElement {
        signature: signature.clone(),
        activation: activation_of(el, base),
    }))
}

fn activation_of(element: ElementRef<'_>, base: Option<&Url>) -> Activation {
    let Some(base) = base else {
        return Activation::NoOp;
    };

    let name = element.value().name();
    if name == "a" {
        return attr(element, "href")
            .filter(|href| !href.trim_start().starts_with("javascript:"))
            .and_then(|href| base.join(href.trim()).ok())
            .map(Activation::Follow)
            .unwrap_or(Activation::NoOp);
    }

    let submits = match name {
        "button" => control_type(element) == "submit",
        "input" => matches!(control_type(element).as_str(), "submit" | "image"),
        _ => false,
    };
    if !submits {
        return Activation::NoOp;
    }

    let Some(form) = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "form")
    else {
        return Activation::NoOp;
    };

    let action = attr(form, "action")
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .and_then(|a| base.join(a).ok())
        .unwrap_or_else(|| base.clone());
    let post = attr(form, "method").is_some_and(|m| m.eq_ignore_ascii_case("post"));

    let mut fields = form_fields(form);
    if let (Some(name), Some(value)) = (attr(element, "name"), attr(element, "value")) {
        fields.push((name.to_string(), value.to_string()));
    }

    Activation::Submit {
        action,
        post,
        fields,
    }
}

/// Successful controls of a form with their default values.
fn form_fields(form: ElementRef<'_>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let Ok(controls) = selector("input[name], textarea[name], select[name]") else {
        return fields;
    };
    let Ok(options) = selector("option") else {
        return fields;
    };

    for control in form.select(&controls) {
        if attr(control, "disabled").is_some() {
            continue;
        }
        let Some(name) = attr(control, "name") else {
            continue;
        };
        let value = match control.value().name() {
            "textarea" => control.text().collect::<String>(),
            "select" => {
                let chosen = control
                    .select(&options)
                    .find(|o| attr(*o, "selected").is_some())
                    .or_else(|| control.select(&options).next());
                match chosen {
                    Some(o) => attr(o, "value")
                        .map(str::to_string)
                        .unwrap_or_else(|| element_text(o)),
                    None => continue,
                }
            }
            _ => {
                let kind = control_type(control);
                match kind.as_str() {
                    "submit" | "button" | "image" | "reset" | "file" => continue,
                    "checkbox" | "radio" if attr(control, "checked").is_none() => continue,
                    "checkbox" | "radio" => attr(control, "value").unwrap_or("on").to_string(),
                    _ => attr(control, "value").unwrap_or_default().to_string(),
                }
            }
        };
        fields.push((name.to_string(), value));
    }
    fields
}
