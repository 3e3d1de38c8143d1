//! URL templates for topic operations.
//!
//! `{0}` server name, `{1}` caller id. Broker-scoped routes continue with `{2}` broker GUID and
//! `{3}` broker name.

use entity_client::{Routes, ZoneRoutes};

pub const ROUTES: Routes = Routes {
    create: data_manager_path!("/event-brokers/{2}/{3}/topics"),
    create_from_template: data_manager_path!("/event-brokers/{2}/{3}/topics/from-template/{4}"),
    update: data_manager_path!("/event-brokers/{2}/{3}/topics/{4}?isMergeUpdate={5}"),
    remove: data_manager_path!("/event-brokers/{2}/{3}/topics/{4}/{5}/delete"),
    find: data_manager_path!("/topics/by-search-string/{2}?startFrom={3}&pageSize={4}"),
    by_name: data_manager_path!("/topics/by-name/{2}?startFrom={3}&pageSize={4}"),
    by_parent: data_manager_path!("/event-brokers/{2}/{3}/topics?startFrom={4}&pageSize={5}"),
    by_guid: data_manager_path!("/topics/{2}"),
};

pub const ZONE_ROUTES: ZoneRoutes = ZoneRoutes {
    publish: data_manager_path!("/topics/{2}/publish"),
    withdraw: data_manager_path!("/topics/{2}/withdraw"),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::assert_arity;

    #[test]
    fn test_every_route_uses_exactly_its_arguments() {
        assert_arity(ROUTES.create, 4);
        assert_arity(ROUTES.create_from_template, 5);
        assert_arity(ROUTES.update, 6);
        assert_arity(ROUTES.remove, 6);
        assert_arity(ROUTES.find, 5);
        assert_arity(ROUTES.by_name, 5);
        assert_arity(ROUTES.by_parent, 6);
        assert_arity(ROUTES.by_guid, 3);
        assert_arity(ZONE_ROUTES.publish, 3);
        assert_arity(ZONE_ROUTES.withdraw, 3);
    }

    #[test]
    fn test_zone_routes_are_siblings() {
        assert_eq!(
            ZONE_ROUTES.publish.trim_end_matches("/publish"),
            ZONE_ROUTES.withdraw.trim_end_matches("/withdraw")
        );
        assert!(!ZONE_ROUTES.withdraw.contains("topicstopics"));
        assert!(ZONE_ROUTES.withdraw.starts_with(ROUTES.by_guid));
    }
}
