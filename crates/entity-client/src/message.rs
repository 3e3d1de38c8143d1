//! # Rest Calls and Response Envelopes
//!
//! This module defines what travels across the [`Invoker`](crate::Invoker) boundary: the
//! outbound [`RestCall`] and the inbound envelopes the server wraps every result in.
//! Callers of the entity clients never see either; the client unwraps envelopes into bare
//! GUIDs, elements and vectors.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tokio::sync::oneshot;

pub type Response<T> = oneshot::Sender<Result<T>>;

/// HTTP verb of a call. Reads are GETs; every mutation is a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Get => write!(f, "GET"),
            Verb::Post => write!(f, "POST"),
        }
    }
}

/// Paging bounds that already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start_from: u32,
    pub page_size: u32,
}

/// The semantic operation behind a call, with its operands.
///
/// The HTTP invoker only needs the template and arguments; in-process invokers use this
/// descriptor instead of parsing paths.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create {
        parent: Vec<String>,
    },
    CreateFromTemplate {
        parent: Vec<String>,
        template_guid: String,
    },
    Update {
        parent: Vec<String>,
        guid: String,
        merge: bool,
    },
    Publish {
        guid: String,
    },
    Withdraw {
        guid: String,
    },
    Remove {
        parent: Vec<String>,
        guid: String,
        qualified_name: String,
    },
    FindByPattern {
        pattern: String,
        page: Page,
    },
    GetByName {
        name: String,
        page: Page,
    },
    ListByParent {
        parent: Vec<String>,
        page: Page,
    },
    /// Children of any element (e.g. an event set), regardless of the full parent scope.
    ListByAnchor {
        anchor_guid: String,
        page: Page,
    },
    GetByGuid {
        guid: String,
    },
}

/// One remote call: operation name, URL template plus positional arguments, and body.
#[derive(Debug, Clone)]
pub struct RestCall {
    pub method_name: String,
    pub type_name: &'static str,
    pub verb: Verb,
    pub template: &'static str,
    pub args: Vec<String>,
    pub body: Option<serde_json::Value>,
    pub operation: Operation,
}

impl RestCall {
    pub fn get(
        method_name: impl Into<String>,
        type_name: &'static str,
        template: &'static str,
        operation: Operation,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            type_name,
            verb: Verb::Get,
            template,
            args: Vec::new(),
            body: None,
            operation,
        }
    }

    pub fn post(
        method_name: impl Into<String>,
        type_name: &'static str,
        template: &'static str,
        operation: Operation,
    ) -> Self {
        Self {
            verb: Verb::Post,
            ..Self::get(method_name, type_name, template, operation)
        }
    }

    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.args.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    /// The caller id, which every route carries as `{1}`.
    pub fn caller_id(&self) -> &str {
        self.args.get(1).map_or("", String::as_str)
    }

    /// Serializes `body` as the request payload.
    pub fn body<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            ClientError::invalid(&self.method_name, "requestBody", e.to_string())
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Substitutes every `{n}` placeholder with the percent-encoded n-th argument.
    ///
    /// Fails when the template references an argument that was not supplied or contains an
    /// unterminated placeholder.
    pub fn resolve_path(&self) -> Result<String> {
        let mut resolved = String::with_capacity(self.template.len() + 64);
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            resolved.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                ClientError::invalid(&self.method_name, "urlTemplate", "unterminated placeholder")
            })?;
            let index: usize = after[..close].parse().map_err(|_| {
                ClientError::invalid(
                    &self.method_name,
                    "urlTemplate",
                    format!("placeholder {{{}}} is not positional", &after[..close]),
                )
            })?;
            let value = self.args.get(index).ok_or_else(|| {
                ClientError::invalid(
                    &self.method_name,
                    "urlTemplate",
                    format!(
                        "placeholder {{{index}}} has no argument ({} supplied)",
                        self.args.len()
                    ),
                )
            })?;
            resolved.push_str(&urlencoding::encode(value));
            rest = &after[close + 1..];
        }
        resolved.push_str(rest);
        Ok(resolved)
    }
}

/// A call forwarded to the in-process [`CatalogActor`](crate::CatalogActor).
#[derive(Debug)]
pub struct CatalogRequest {
    pub call: RestCall,
    pub respond_to: Response<serde_json::Value>,
}

// =============================================================================
// RESPONSE ENVELOPES
// =============================================================================

/// Diagnostic fields every server response carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FfdcResponse {
    #[serde(rename = "relatedHTTPCode")]
    pub related_http_code: Option<u16>,
    pub exception_class_name: Option<String>,
    pub exception_error_message: Option<String>,
    pub exception_user_action: Option<String>,
    pub exception_properties: Option<BTreeMap<String, serde_json::Value>>,
}

impl FfdcResponse {
    /// Converts a reported exception into the matching [`ClientError`].
    ///
    /// `None` when the response reports success (no code, or a 2xx code).
    pub fn to_error(&self, method: &str, user_id: &str) -> Option<ClientError> {
        let code = self.related_http_code?;
        if (200..300).contains(&code) {
            return None;
        }
        let message = self
            .exception_error_message
            .clone()
            .or_else(|| self.exception_class_name.clone())
            .unwrap_or_else(|| format!("request failed with code {code}"));

        Some(match code {
            400 => {
                let parameter = self
                    .exception_properties
                    .as_ref()
                    .and_then(|props| props.get("parameterName"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("request");
                ClientError::invalid(method, parameter, message)
            }
            401 | 403 => ClientError::not_authorized(method, user_id, message),
            other => ClientError::server_fault(method, Some(other), message),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidResponse {
    #[serde(flatten)]
    pub ffdc: FfdcResponse,
    #[serde(default)]
    pub guid: Option<String>,
}

impl GuidResponse {
    pub fn into_guid(self, method: &str) -> Result<String> {
        self.guid
            .filter(|g| !g.is_empty())
            .ok_or_else(|| ClientError::server_fault(method, None, "response carried no GUID"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidResponse {
    #[serde(flatten)]
    pub ffdc: FfdcResponse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound = "T: serde::de::DeserializeOwned")]
pub struct ElementResponse<T> {
    #[serde(flatten)]
    pub ffdc: FfdcResponse,
    #[serde(default)]
    pub element: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound = "T: serde::de::DeserializeOwned")]
pub struct ElementsResponse<T> {
    #[serde(flatten)]
    pub ffdc: FfdcResponse,
    #[serde(default)]
    pub element_list: Option<Vec<T>>,
}

impl<T> ElementsResponse<T> {
    /// A missing list means "no matches", not an error.
    pub fn into_elements(self) -> Vec<T> {
        self.element_list.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(template: &'static str) -> RestCall {
        RestCall::get(
            "getTopicByGUID",
            "Topic",
            template,
            Operation::GetByGuid { guid: "g".into() },
        )
    }

    #[test]
    fn test_resolve_path_encodes_arguments() {
        let path = call("/servers/{0}/users/{1}/topics/by-name/{2}?startFrom={3}")
            .args(["cocoMDS1", "erinoverview", "orders/v1 raw", "0"])
            .resolve_path()
            .unwrap();
        assert_eq!(
            path,
            "/servers/cocoMDS1/users/erinoverview/topics/by-name/orders%2Fv1%20raw?startFrom=0"
        );
    }

    #[test]
    fn test_resolve_path_may_skip_arguments() {
        let path = call("/a/{0}/b/{2}")
            .args(["x", "unused", "z"])
            .resolve_path()
            .unwrap();
        assert_eq!(path, "/a/x/b/z");
    }

    #[test]
    fn test_resolve_path_rejects_missing_argument() {
        let err = call("/servers/{0}/users/{1}/topics/{4}/publish")
            .args(["srv", "user", "guid"])
            .resolve_path()
            .unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("{4}"));
    }

    #[test]
    fn test_ffdc_maps_codes() {
        let ffdc: FfdcResponse = serde_json::from_value(json!({
            "relatedHTTPCode": 403,
            "exceptionErrorMessage": "user not allowed"
        }))
        .unwrap();
        assert!(ffdc.to_error("findTopics", "bob").unwrap().is_not_authorized());

        let ffdc: FfdcResponse = serde_json::from_value(json!({
            "relatedHTTPCode": 400,
            "exceptionProperties": { "parameterName": "guid" }
        }))
        .unwrap();
        match ffdc.to_error("getTopicByGUID", "bob").unwrap() {
            ClientError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "guid"),
            other => panic!("unexpected {other:?}"),
        }

        let ok: FfdcResponse = serde_json::from_value(json!({ "relatedHTTPCode": 200 })).unwrap();
        assert!(ok.to_error("findTopics", "bob").is_none());
    }

    #[test]
    fn test_elements_response_defaults_to_empty() {
        let response: ElementsResponse<serde_json::Value> =
            serde_json::from_value(json!({ "relatedHTTPCode": 200 })).unwrap();
        assert!(response.into_elements().is_empty());
    }
}
