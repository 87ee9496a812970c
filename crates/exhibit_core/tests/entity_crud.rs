use chrono::{NaiveDate, TimeZone, Utc};
use exhibit_core::{
    DatabaseFacade, Exhibition, ExhibitionFacade, Operation, RepoError, Store, Ticket, Visitor,
    UNSAVED_ID,
};
use std::collections::HashSet;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn add_visitor_assigns_id_and_get_returns_equal_record() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let mut visitor = Visitor::new("Grace Hopper", 25);
    assert!(!visitor.is_persisted());
    let id = facade.add_visitor(&mut visitor).unwrap();

    assert_ne!(id, UNSAVED_ID);
    assert_eq!(visitor.id, id);
    let loaded = facade.get_visitor(id).unwrap().unwrap();
    assert_eq!(loaded, visitor);
}

#[test]
fn client_supplied_id_is_ignored_on_insert() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let mut visitor = Visitor::new("Preset", 5);
    visitor.id = 4242;
    let id = facade.add_visitor(&mut visitor).unwrap();

    assert_eq!(id, 1);
    assert!(facade.get_visitor(4242).unwrap().is_none());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let first = facade.add_visitor(&mut Visitor::new("one", 0)).unwrap();
    facade.delete_visitor(first).unwrap();
    let second = facade.add_visitor(&mut Visitor::new("two", 0)).unwrap();

    assert!(second > first);
}

#[test]
fn exhibition_date_roundtrips_in_utc() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let mut exhibition = Exhibition::on_day("Impressionists", day(2025, 3, 14));
    let id = facade.add_exhibition(&mut exhibition).unwrap();

    let loaded = facade.get_exhibition(id).unwrap().unwrap();
    assert_eq!(loaded, exhibition);
    assert_eq!(loaded.date, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
}

#[test]
fn list_contains_every_inserted_record() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let mut inserted = HashSet::new();
    for (name, discount) in [("a", 0), ("b", 50), ("c", 100)] {
        inserted.insert(facade.add_visitor(&mut Visitor::new(name, discount)).unwrap());
    }

    let listed: HashSet<_> = facade
        .list_visitors()
        .unwrap()
        .into_iter()
        .map(|visitor| visitor.id)
        .collect();
    assert!(listed.len() >= inserted.len());
    assert!(inserted.is_subset(&listed));
}

#[test]
fn update_overwrites_all_mutable_fields() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let mut visitor = Visitor::new("draft", 10);
    facade.add_visitor(&mut visitor).unwrap();
    visitor.name = "final".to_string();
    visitor.discount = 30;
    facade.update_visitor(&visitor).unwrap();
    assert_eq!(facade.get_visitor(visitor.id).unwrap().unwrap(), visitor);

    let mut exhibition = Exhibition::on_day("Old", day(2024, 1, 1));
    facade.add_exhibition(&mut exhibition).unwrap();
    exhibition.name = "New".to_string();
    exhibition.date = Utc.with_ymd_and_hms(2024, 6, 30, 18, 0, 0).unwrap();
    facade.update_exhibition(&exhibition).unwrap();
    assert_eq!(
        facade.get_exhibition(exhibition.id).unwrap().unwrap(),
        exhibition
    );

    let mut other = Visitor::new("other", 0);
    facade.add_visitor(&mut other).unwrap();
    let mut ticket = Ticket::new(visitor.id, exhibition.id, 12.5);
    facade.add_ticket(&mut ticket).unwrap();
    ticket.visitor_id = other.id;
    ticket.price = 20.0;
    facade.update_ticket(&ticket).unwrap();
    assert_eq!(facade.get_ticket(ticket.id).unwrap().unwrap(), ticket);
}

#[test]
fn update_of_missing_id_fails_without_creating_a_row() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();
    facade.add_visitor(&mut Visitor::new("existing", 0)).unwrap();

    let mut ghost = Visitor::new("ghost", 10);
    ghost.id = 999;
    let err = facade.update_visitor(&ghost).unwrap_err();

    assert_eq!(err.operation, Operation::UpdateVisitor);
    assert!(err.is_not_found());
    assert!(matches!(
        err.source,
        RepoError::NotFound { entity: "visitor", id: 999 }
    ));
    let visitors = facade.list_visitors().unwrap();
    assert_eq!(visitors.len(), 1);
    assert!(visitors.iter().all(|visitor| visitor.name != "ghost"));

    let mut ghost_exhibition = Exhibition::on_day("ghost", day(2020, 1, 1));
    ghost_exhibition.id = 999;
    assert!(facade.update_exhibition(&ghost_exhibition).unwrap_err().is_not_found());
    assert!(facade.list_exhibitions().unwrap().is_empty());

    let mut ghost_ticket = Ticket::new(1, 1, 1.0);
    ghost_ticket.id = 999;
    assert!(facade.update_ticket(&ghost_ticket).unwrap_err().is_not_found());
    assert!(facade.list_tickets().unwrap().is_empty());
}

#[test]
fn get_missing_id_returns_none() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    assert!(facade.get_visitor(1).unwrap().is_none());
    assert!(facade.get_exhibition(1).unwrap().is_none());
    assert!(facade.get_ticket(1).unwrap().is_none());
}

#[test]
fn delete_then_get_returns_none_for_existing_and_missing_ids() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let id = facade.add_visitor(&mut Visitor::new("leaving", 0)).unwrap();
    facade.delete_visitor(id).unwrap();
    assert!(facade.get_visitor(id).unwrap().is_none());

    facade.delete_visitor(12345).unwrap();
    facade.delete_exhibition(12345).unwrap();
    facade.delete_ticket(12345).unwrap();
    assert!(facade.get_visitor(12345).unwrap().is_none());
}

#[test]
fn facade_persists_out_of_range_values_as_given() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let mut visitor = Visitor::new("generous", 150);
    facade.add_visitor(&mut visitor).unwrap();
    let mut exhibition = Exhibition::on_day("free", day(2025, 1, 1));
    facade.add_exhibition(&mut exhibition).unwrap();
    let mut ticket = Ticket::new(visitor.id, exhibition.id, -5.0);
    facade.add_ticket(&mut ticket).unwrap();

    assert_eq!(facade.get_visitor(visitor.id).unwrap().unwrap().discount, 150);
    assert_eq!(facade.get_ticket(ticket.id).unwrap().unwrap().price, -5.0);
}

#[test]
fn records_serialize_with_field_names() {
    let visitor = Visitor::new("Ada", 10);
    let json = serde_json::to_value(&visitor).unwrap();
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["discount"], 10);

    let ticket: Ticket = serde_json::from_str(
        r#"{"id":3,"visitor_id":1,"exhibition_id":2,"price":9.5}"#,
    )
    .unwrap();
    assert!(ticket.is_persisted());
    assert_eq!(ticket.exhibition_id, 2);
}
