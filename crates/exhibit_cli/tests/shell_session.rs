use exhibit_cli::Shell;
use exhibit_core::{DatabaseFacade, ExhibitionFacade, Store};
use std::io::Cursor;

fn run_script(facade: &DatabaseFacade<'_>, lines: &[&str]) -> String {
    let script = lines.join("\n") + "\n";
    let mut shell = Shell::new(facade, Cursor::new(script), Vec::new());
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

#[test]
fn exit_choice_and_end_of_input_both_terminate() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(&facade, &["0"]);
    assert!(output.contains("=== Main menu ==="));
    assert!(output.ends_with("Goodbye.\n"));

    let mut shell = Shell::new(&facade, Cursor::new(""), Vec::new());
    shell.run().unwrap();
    let output = String::from_utf8(shell.into_output()).unwrap();
    assert!(output.ends_with("Goodbye.\n"));
}

#[test]
fn add_and_list_visitors() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(&facade, &["1", "1", "Ada", "15", "2", "0", "0"]);

    assert!(output.contains("Visitor added with ID 1."));
    assert!(output.contains("ID: 1, Name: Ada, Discount: 15%"));
    assert_eq!(facade.list_visitors().unwrap().len(), 1);
}

#[test]
fn out_of_range_discount_never_reaches_the_store() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(&facade, &["1", "1", "Greedy", "150", "0", "0"]);

    assert!(output.contains("Invalid input: discount must be a whole number from 0 to 100"));
    assert!(facade.list_visitors().unwrap().is_empty());
}

#[test]
fn ticket_flow_validates_references_and_price() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(
        &facade,
        &[
            "3", "1", // add ticket with nothing in the store
            "0", "1", "1", "Ada", "10", "0", // add visitor
            "2", "1", "Monet", "2025-04-01", "0", // add exhibition
            "3", "1", "9", // unknown visitor
            "1", "1", "1", "0", // zero price
            "1", "1", "1", "24.5", // valid ticket
            "2", "0", "0",
        ],
    );

    assert!(output.contains("Invalid input: cannot add a ticket: there are no visitors"));
    assert!(output.contains("Invalid input: no visitor with ID 9"));
    assert!(output.contains("Invalid input: price must be a positive number, got `0`"));
    assert!(output.contains("Ticket added with ID 1."));
    assert!(output.contains("ID: 1, Visitor ID: 1, Exhibition ID: 1, Price: 24.50"));
    assert_eq!(facade.list_tickets().unwrap().len(), 1);
}

#[test]
fn update_keeps_fields_left_blank() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(
        &facade,
        &[
            "2", "1", "Dali", "2025-06-01", // add exhibition
            "3", "1", "", "2025-07-15", // keep name, change date
            "3", "42", // missing id
            "0", "0",
        ],
    );

    assert!(output.contains("Exhibition 1 updated."));
    assert!(output.contains("Exhibition with ID 42 not found."));
    let exhibition = facade.get_exhibition(1).unwrap().unwrap();
    assert_eq!(exhibition.name, "Dali");
    assert_eq!(exhibition.date.format("%Y-%m-%d").to_string(), "2025-07-15");
}

#[test]
fn malformed_update_value_cancels_the_update() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(
        &facade,
        &["1", "1", "Ada", "10", "3", "1", "Ada Lovelace", "lots", "0", "0"],
    );

    assert!(output.contains("Invalid input: discount must be a whole number"));
    let visitor = facade.get_visitor(1).unwrap().unwrap();
    assert_eq!(visitor.name, "Ada");
    assert_eq!(visitor.discount, 10);
}

#[test]
fn ticket_update_to_unknown_visitor_reports_store_error_and_continues() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(
        &facade,
        &[
            "1", "1", "Ada", "10", "0",
            "2", "1", "Monet", "2025-04-01", "0",
            "3", "1", "1", "1", "30", // add ticket
            "3", "1", "77", "", "", // point it at a missing visitor
            "2", "0", "0",
        ],
    );

    assert!(output.contains("Error: failed to update ticket: "));
    assert!(output.contains("ID: 1, Visitor ID: 1, Exhibition ID: 1, Price: 30.00"));
}

#[test]
fn delete_of_missing_id_is_silent_and_delete_cascades() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(
        &facade,
        &[
            "1", "1", "Ada", "10", "0",
            "2", "1", "Monet", "2025-04-01", "4", "99", "0",
            "3", "1", "1", "1", "30", "0",
            "1", "4", "1", "0",
            "0",
        ],
    );

    assert!(output.contains("Exhibition 99 removed (if it existed)."));
    assert!(output.contains("Visitor 1 removed (if it existed)."));
    assert!(facade.list_tickets().unwrap().is_empty());
    assert_eq!(facade.list_exhibitions().unwrap().len(), 1);
}

#[test]
fn analytics_queries_print_results() {
    let store = Store::open_in_memory().unwrap();
    let facade = DatabaseFacade::try_new(&store).unwrap();

    let output = run_script(
        &facade,
        &[
            "1", "1", "Low", "10", "1", "High", "20", "0",
            "2", "1", "Show", "2025-04-01", "0",
            "3", "1", "1", "1", "5", "1", "2", "1", "5", "1", "2", "1", "5", "0",
            "4", "1", "1", "2", "2", "3", "1", "3", "7", "2", "x", "0",
            "0",
        ],
    );

    assert!(output.contains("Exhibition 1: 3 tickets sold."));
    assert!(output.contains("Visitor 2 holds tickets for 1 unique exhibitions."));
    assert!(output.contains("Average discount for exhibition 1: 16.67%"));
    assert!(output.contains("Average discount for exhibition 7: 0.00%"));
    assert!(output.contains("Invalid input: `x` is not a valid ID"));
}
