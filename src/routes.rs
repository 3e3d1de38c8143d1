//! Route helpers shared by the entity kinds.

/// Prefixes a path with the Data Manager user root:
/// `/servers/{0}/open-metadata/access-services/data-manager/users/{1}`.
macro_rules! data_manager_path {
    ($rest:literal) => {
        concat!(
            "/servers/{0}/open-metadata/access-services/data-manager/users/{1}",
            $rest
        )
    };
}

#[cfg(test)]
pub(crate) fn assert_arity(template: &'static str, arity: usize) {
    use entity_client::{Operation, RestCall};

    let call = |count: usize| {
        RestCall::get(
            "routeCheck",
            "Test",
            template,
            Operation::GetByGuid { guid: String::new() },
        )
        .args((0..count).map(|i| format!("a{i}")))
    };
    assert!(
        call(arity).resolve_path().is_ok(),
        "{template} needs more than {arity} arguments"
    );
    assert!(
        call(arity - 1).resolve_path().is_err(),
        "{template} does not use argument {}",
        arity - 1
    );
}
