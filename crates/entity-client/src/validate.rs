//! Precondition checks run before any request is built.

use crate::error::{ClientError, Result};
use crate::message::Page;

pub fn user_id(user_id: &str, method: &str) -> Result<()> {
    non_empty(user_id, "userId", method)
}

pub fn guid(guid: &str, parameter: &str, method: &str) -> Result<()> {
    non_empty(guid, parameter, method)
}

pub fn name(name: &str, parameter: &str, method: &str) -> Result<()> {
    non_empty(name, parameter, method)
}

/// Search strings are regular expressions and must compile.
pub fn search_string(pattern: &str, parameter: &str, method: &str) -> Result<()> {
    non_empty(pattern, parameter, method)?;
    regex::Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ClientError::invalid(method, parameter, format!("not a valid regular expression: {e}")))
}

/// Checks paging bounds against the server's ceiling (`0` means no ceiling).
pub fn paging(start_from: i32, page_size: i32, max_page_size: u32, method: &str) -> Result<Page> {
    let start_from = u32::try_from(start_from).map_err(|_| {
        ClientError::invalid(method, "startFrom", format!("{start_from} is negative"))
    })?;
    let page_size = u32::try_from(page_size)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| {
            ClientError::invalid(method, "pageSize", format!("{page_size} is not positive"))
        })?;
    if max_page_size > 0 && page_size > max_page_size {
        return Err(ClientError::invalid(
            method,
            "pageSize",
            format!("{page_size} exceeds the maximum page size of {max_page_size}"),
        ));
    }
    Ok(Page {
        start_from,
        page_size,
    })
}

fn non_empty(value: &str, parameter: &str, method: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::invalid(method, parameter, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_identifiers_are_rejected() {
        assert!(user_id("", "createTopic").is_err());
        assert!(guid("   ", "topicGUID", "updateTopic").is_err());
        assert!(name("orders", "qualifiedName", "createTopic").is_ok());
    }

    #[test]
    fn test_search_string_must_compile() {
        assert!(search_string(".*orders.*", "searchString", "findTopics").is_ok());
        let err = search_string("orders(", "searchString", "findTopics").unwrap_err();
        match err {
            ClientError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "searchString"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_paging_bounds() {
        assert_eq!(
            paging(5, 10, 100, "findTopics").unwrap(),
            Page {
                start_from: 5,
                page_size: 10
            }
        );
        assert!(paging(-1, 10, 100, "findTopics").is_err());
        assert!(paging(0, 0, 100, "findTopics").is_err());
        assert!(paging(0, -3, 100, "findTopics").is_err());
        assert!(paging(0, 101, 100, "findTopics").is_err());
        assert!(paging(0, 5000, 0, "findTopics").is_ok());
    }
}
