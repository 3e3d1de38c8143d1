//! URL templates for event type operations.
//!
//! `{0}` server name, `{1}` caller id. Scoped routes continue with `{2}` broker GUID, `{3}`
//! broker name and `{4}` topic GUID. Update and remove address the event type directly under
//! the broker, so they skip `{4}`.

use entity_client::Routes;

pub const ROUTES: Routes = Routes {
    create: data_manager_path!("/event-brokers/{2}/{3}/topics/{4}/event-types"),
    create_from_template: data_manager_path!(
        "/event-brokers/{2}/{3}/topics/{4}/event-types/from-template/{5}"
    ),
    update: data_manager_path!("/event-brokers/{2}/{3}/topics/event-types/{5}?isMergeUpdate={6}"),
    remove: data_manager_path!("/event-brokers/{2}/{3}/topics/event-types/{5}/{6}/delete"),
    find: data_manager_path!("/topics/event-types/by-search-string/{2}?startFrom={3}&pageSize={4}"),
    by_name: data_manager_path!("/topics/event-types/by-name/{2}?startFrom={3}&pageSize={4}"),
    by_parent: data_manager_path!("/topics/{4}/event-types?startFrom={5}&pageSize={6}"),
    by_guid: data_manager_path!("/topics/event-types/{2}"),
};

/// `{2}` event set GUID, `{3}` startFrom, `{4}` pageSize.
pub const FOR_EVENT_SET: &str =
    data_manager_path!("/event-sets/{2}/event-types?startFrom={3}&pageSize={4}");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::assert_arity;

    #[test]
    fn test_every_route_uses_exactly_its_arguments() {
        assert_arity(ROUTES.create, 5);
        assert_arity(ROUTES.create_from_template, 6);
        assert_arity(ROUTES.update, 7);
        assert_arity(ROUTES.remove, 7);
        assert_arity(ROUTES.find, 5);
        assert_arity(ROUTES.by_name, 5);
        assert_arity(ROUTES.by_parent, 7);
        assert_arity(ROUTES.by_guid, 3);
        assert_arity(FOR_EVENT_SET, 5);
    }
}
