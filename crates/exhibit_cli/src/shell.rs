//! Interactive menu loop over the data-access facade.
//!
//! # Responsibility
//! - Read numbered menu choices and field values line by line.
//! - Validate input locally, call the facade, print one line of feedback.
//!
//! # Invariants
//! - End of input acts like `0` (back/exit) at every menu level.
//! - Facade errors are printed and the loop continues.
//! - Invalid input never reaches the facade.

use crate::input::{
    parse_date, parse_discount, parse_id, parse_price, ValidationError, DATE_FORMAT,
};
use exhibit_core::{Exhibition, ExhibitionFacade, FacadeResult, Ticket, Visitor};
use log::info;
use std::io::{self, BufRead, Write};

const CHOOSE_PROMPT: &str = "Choose an action: ";

#[derive(Debug, Clone, Copy)]
enum Entity {
    Visitor,
    Exhibition,
    Ticket,
}

impl Entity {
    fn title(self) -> &'static str {
        match self {
            Self::Visitor => "Visitors",
            Self::Exhibition => "Exhibitions",
            Self::Ticket => "Tickets",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::Exhibition => "exhibition",
            Self::Ticket => "ticket",
        }
    }
}

/// Answer to an optional edit prompt.
enum Edit<T> {
    Keep,
    Set(T),
    Cancel,
}

/// Console shell driving an [`ExhibitionFacade`].
pub struct Shell<'f, F, R, W> {
    facade: &'f F,
    input: R,
    output: W,
}

impl<'f, F, R, W> Shell<'f, F, R, W>
where
    F: ExhibitionFacade,
    R: BufRead,
    W: Write,
{
    pub fn new(facade: &'f F, input: R, output: W) -> Self {
        Self {
            facade,
            input,
            output,
        }
    }

    /// Consumes the shell and returns the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the main menu until `0` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n=== Main menu ===")?;
            writeln!(self.output, "1. Manage visitors")?;
            writeln!(self.output, "2. Manage exhibitions")?;
            writeln!(self.output, "3. Manage tickets")?;
            writeln!(self.output, "4. Analytics")?;
            writeln!(self.output, "0. Exit")?;
            let Some(choice) = self.prompt(CHOOSE_PROMPT)? else {
                break;
            };
            match choice.as_str() {
                "1" => self.entity_menu(Entity::Visitor)?,
                "2" => self.entity_menu(Entity::Exhibition)?,
                "3" => self.entity_menu(Entity::Ticket)?,
                "4" => self.analytics_menu()?,
                "0" => break,
                _ => writeln!(self.output, "Unknown choice, try again.")?,
            }
        }
        writeln!(self.output, "Goodbye.")?;
        self.output.flush()
    }

    fn entity_menu(&mut self, entity: Entity) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n=== {} ===", entity.title())?;
            writeln!(self.output, "1. Add {}", entity.noun())?;
            writeln!(self.output, "2. List {}", entity.title().to_lowercase())?;
            writeln!(self.output, "3. Update {}", entity.noun())?;
            writeln!(self.output, "4. Delete {}", entity.noun())?;
            writeln!(self.output, "0. Back")?;
            let Some(choice) = self.prompt(CHOOSE_PROMPT)? else {
                return Ok(());
            };
            match (choice.as_str(), entity) {
                ("1", Entity::Visitor) => self.add_visitor()?,
                ("1", Entity::Exhibition) => self.add_exhibition()?,
                ("1", Entity::Ticket) => self.add_ticket()?,
                ("2", Entity::Visitor) => self.show_visitors().map(drop)?,
                ("2", Entity::Exhibition) => self.show_exhibitions().map(drop)?,
                ("2", Entity::Ticket) => self.show_tickets().map(drop)?,
                ("3", Entity::Visitor) => self.update_visitor()?,
                ("3", Entity::Exhibition) => self.update_exhibition()?,
                ("3", Entity::Ticket) => self.update_ticket()?,
                ("4", _) => self.delete(entity)?,
                ("0", _) => return Ok(()),
                _ => writeln!(self.output, "Unknown choice.")?,
            }
        }
    }

    fn add_visitor(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Visitor name: ")? else {
            return Ok(());
        };
        let Some(discount) = self.ask("Discount (0-100%): ", parse_discount)? else {
            return Ok(());
        };

        let mut visitor = Visitor::new(name, discount);
        let result = self.facade.add_visitor(&mut visitor);
        if let Some(id) = self.report(result)? {
            info!("event=shell_action module=shell action=add_visitor status=ok id={id}");
            writeln!(self.output, "Visitor added with ID {id}.")?;
        }
        Ok(())
    }

    fn add_exhibition(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Exhibition name: ")? else {
            return Ok(());
        };
        let Some(date) = self.ask("Exhibition date (yyyy-mm-dd): ", parse_date)? else {
            return Ok(());
        };

        let mut exhibition = Exhibition::new(name, date);
        let result = self.facade.add_exhibition(&mut exhibition);
        if let Some(id) = self.report(result)? {
            info!("event=shell_action module=shell action=add_exhibition status=ok id={id}");
            writeln!(self.output, "Exhibition added with ID {id}.")?;
        }
        Ok(())
    }

    fn add_ticket(&mut self) -> io::Result<()> {
        let Some(visitors) = self.show_visitors()? else {
            return Ok(());
        };
        if visitors.is_empty() {
            return self.reject(ValidationError::NoVisitors);
        }
        let Some(visitor_id) = self.ask("\nVisitor ID: ", parse_id)? else {
            return Ok(());
        };
        if !visitors.iter().any(|visitor| visitor.id == visitor_id) {
            return self.reject(ValidationError::UnknownVisitor(visitor_id));
        }

        let Some(exhibitions) = self.show_exhibitions()? else {
            return Ok(());
        };
        if exhibitions.is_empty() {
            return self.reject(ValidationError::NoExhibitions);
        }
        let Some(exhibition_id) = self.ask("\nExhibition ID: ", parse_id)? else {
            return Ok(());
        };
        if !exhibitions
            .iter()
            .any(|exhibition| exhibition.id == exhibition_id)
        {
            return self.reject(ValidationError::UnknownExhibition(exhibition_id));
        }

        let Some(price) = self.ask("Ticket price: ", parse_price)? else {
            return Ok(());
        };

        let mut ticket = Ticket::new(visitor_id, exhibition_id, price);
        let result = self.facade.add_ticket(&mut ticket);
        if let Some(id) = self.report(result)? {
            info!("event=shell_action module=shell action=add_ticket status=ok id={id}");
            writeln!(self.output, "Ticket added with ID {id}.")?;
        }
        Ok(())
    }

    fn show_visitors(&mut self) -> io::Result<Option<Vec<Visitor>>> {
        let result = self.facade.list_visitors();
        let Some(visitors) = self.report(result)? else {
            return Ok(None);
        };
        if visitors.is_empty() {
            writeln!(self.output, "No visitors yet.")?;
        } else {
            writeln!(self.output, "\n=== Visitor list ===")?;
            for visitor in &visitors {
                writeln!(
                    self.output,
                    "ID: {}, Name: {}, Discount: {}%",
                    visitor.id, visitor.name, visitor.discount
                )?;
            }
        }
        Ok(Some(visitors))
    }

    fn show_exhibitions(&mut self) -> io::Result<Option<Vec<Exhibition>>> {
        let result = self.facade.list_exhibitions();
        let Some(exhibitions) = self.report(result)? else {
            return Ok(None);
        };
        if exhibitions.is_empty() {
            writeln!(self.output, "No exhibitions yet.")?;
        } else {
            writeln!(self.output, "\n=== Exhibition list ===")?;
            for exhibition in &exhibitions {
                writeln!(
                    self.output,
                    "ID: {}, Name: {}, Date: {}",
                    exhibition.id,
                    exhibition.name,
                    exhibition.date.format(DATE_FORMAT)
                )?;
            }
        }
        Ok(Some(exhibitions))
    }

    fn show_tickets(&mut self) -> io::Result<Option<Vec<Ticket>>> {
        let result = self.facade.list_tickets();
        let Some(tickets) = self.report(result)? else {
            return Ok(None);
        };
        if tickets.is_empty() {
            writeln!(self.output, "No tickets yet.")?;
        } else {
            writeln!(self.output, "\n=== Ticket list ===")?;
            for ticket in &tickets {
                writeln!(
                    self.output,
                    "ID: {}, Visitor ID: {}, Exhibition ID: {}, Price: {:.2}",
                    ticket.id, ticket.visitor_id, ticket.exhibition_id, ticket.price
                )?;
            }
        }
        Ok(Some(tickets))
    }

    fn update_visitor(&mut self) -> io::Result<()> {
        if self.show_visitors()?.is_none() {
            return Ok(());
        }
        let Some(id) = self.ask("\nVisitor ID to update: ", parse_id)? else {
            return Ok(());
        };
        let result = self.facade.get_visitor(id);
        let Some(found) = self.report(result)? else {
            return Ok(());
        };
        let Some(mut visitor) = found else {
            writeln!(self.output, "Visitor with ID {id} not found.")?;
            return Ok(());
        };

        let prompt = format!("New name (current: {}): ", visitor.name);
        match self.ask_edit(&prompt, |value| Ok(value.to_string()))? {
            Edit::Set(name) => visitor.name = name,
            Edit::Keep => {}
            Edit::Cancel => return Ok(()),
        }
        let prompt = format!("New discount (current: {}%): ", visitor.discount);
        match self.ask_edit(&prompt, parse_discount)? {
            Edit::Set(discount) => visitor.discount = discount,
            Edit::Keep => {}
            Edit::Cancel => return Ok(()),
        }

        let result = self.facade.update_visitor(&visitor);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Visitor {id} updated.")?;
        }
        Ok(())
    }

    fn update_exhibition(&mut self) -> io::Result<()> {
        if self.show_exhibitions()?.is_none() {
            return Ok(());
        }
        let Some(id) = self.ask("\nExhibition ID to update: ", parse_id)? else {
            return Ok(());
        };
        let result = self.facade.get_exhibition(id);
        let Some(found) = self.report(result)? else {
            return Ok(());
        };
        let Some(mut exhibition) = found else {
            writeln!(self.output, "Exhibition with ID {id} not found.")?;
            return Ok(());
        };

        let prompt = format!("New name (current: {}): ", exhibition.name);
        match self.ask_edit(&prompt, |value| Ok(value.to_string()))? {
            Edit::Set(name) => exhibition.name = name,
            Edit::Keep => {}
            Edit::Cancel => return Ok(()),
        }
        let prompt = format!(
            "New date (current: {}): ",
            exhibition.date.format(DATE_FORMAT)
        );
        match self.ask_edit(&prompt, parse_date)? {
            Edit::Set(date) => exhibition.date = date,
            Edit::Keep => {}
            Edit::Cancel => return Ok(()),
        }

        let result = self.facade.update_exhibition(&exhibition);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Exhibition {id} updated.")?;
        }
        Ok(())
    }

    fn update_ticket(&mut self) -> io::Result<()> {
        if self.show_tickets()?.is_none() {
            return Ok(());
        }
        let Some(id) = self.ask("\nTicket ID to update: ", parse_id)? else {
            return Ok(());
        };
        let result = self.facade.get_ticket(id);
        let Some(found) = self.report(result)? else {
            return Ok(());
        };
        let Some(mut ticket) = found else {
            writeln!(self.output, "Ticket with ID {id} not found.")?;
            return Ok(());
        };

        let prompt = format!("New visitor ID (current: {}): ", ticket.visitor_id);
        match self.ask_edit(&prompt, parse_id)? {
            Edit::Set(visitor_id) => ticket.visitor_id = visitor_id,
            Edit::Keep => {}
            Edit::Cancel => return Ok(()),
        }
        let prompt = format!("New exhibition ID (current: {}): ", ticket.exhibition_id);
        match self.ask_edit(&prompt, parse_id)? {
            Edit::Set(exhibition_id) => ticket.exhibition_id = exhibition_id,
            Edit::Keep => {}
            Edit::Cancel => return Ok(()),
        }
        let prompt = format!("New price (current: {:.2}): ", ticket.price);
        match self.ask_edit(&prompt, parse_price)? {
            Edit::Set(price) => ticket.price = price,
            Edit::Keep => {}
            Edit::Cancel => return Ok(()),
        }

        // Unknown visitor/exhibition ids are left to the store's foreign keys.
        let result = self.facade.update_ticket(&ticket);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Ticket {id} updated.")?;
        }
        Ok(())
    }

    fn delete(&mut self, entity: Entity) -> io::Result<()> {
        let listed = match entity {
            Entity::Visitor => self.show_visitors()?.is_some(),
            Entity::Exhibition => self.show_exhibitions()?.is_some(),
            Entity::Ticket => self.show_tickets()?.is_some(),
        };
        if !listed {
            return Ok(());
        }
        let prompt = format!("\n{} ID to delete: ", capitalize(entity.noun()));
        let Some(id) = self.ask(&prompt, parse_id)? else {
            return Ok(());
        };

        let result = match entity {
            Entity::Visitor => self.facade.delete_visitor(id),
            Entity::Exhibition => self.facade.delete_exhibition(id),
            Entity::Ticket => self.facade.delete_ticket(id),
        };
        if self.report(result)?.is_some() {
            info!(
                "event=shell_action module=shell action=delete_{} status=ok id={id}",
                entity.noun()
            );
            writeln!(
                self.output,
                "{} {id} removed (if it existed).",
                capitalize(entity.noun())
            )?;
        }
        Ok(())
    }

    fn analytics_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n=== Analytics ===")?;
            writeln!(self.output, "1. Tickets sold for an exhibition")?;
            writeln!(self.output, "2. Unique exhibitions for a visitor")?;
            writeln!(self.output, "3. Average visitor discount for an exhibition")?;
            writeln!(self.output, "0. Back")?;
            let Some(choice) = self.prompt("Choose a query: ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => {
                    self.show_exhibitions()?;
                    if let Some(id) = self.ask("\nExhibition ID: ", parse_id)? {
                        let result = self.facade.sold_tickets_count(id);
                        if let Some(count) = self.report(result)? {
                            writeln!(self.output, "Exhibition {id}: {count} tickets sold.")?;
                        }
                    }
                }
                "2" => {
                    self.show_visitors()?;
                    if let Some(id) = self.ask("\nVisitor ID: ", parse_id)? {
                        let result = self.facade.unique_exhibitions_count(id);
                        if let Some(count) = self.report(result)? {
                            writeln!(
                                self.output,
                                "Visitor {id} holds tickets for {count} unique exhibitions."
                            )?;
                        }
                    }
                }
                "3" => {
                    self.show_exhibitions()?;
                    if let Some(id) = self.ask("\nExhibition ID: ", parse_id)? {
                        let result = self.facade.average_discount_for_exhibition(id);
                        if let Some(average) = self.report(result)? {
                            writeln!(
                                self.output,
                                "Average discount for exhibition {id}: {average:.2}%"
                            )?;
                        }
                    }
                }
                "0" => return Ok(()),
                _ => writeln!(self.output, "Unknown choice.")?,
            }
        }
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts and parses; `None` at end of input or after a rejection.
    fn ask<T>(
        &mut self,
        text: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<Option<T>> {
        let Some(line) = self.prompt(text)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.reject(err)?;
                Ok(None)
            }
        }
    }

    /// Like [`Shell::ask`], but an empty answer keeps the current value.
    fn ask_edit<T>(
        &mut self,
        text: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<Edit<T>> {
        let Some(line) = self.prompt(text)? else {
            return Ok(Edit::Cancel);
        };
        if line.is_empty() {
            return Ok(Edit::Keep);
        }
        match parse(&line) {
            Ok(value) => Ok(Edit::Set(value)),
            Err(err) => {
                self.reject(err)?;
                Ok(Edit::Cancel)
            }
        }
    }

    fn reject(&mut self, err: ValidationError) -> io::Result<()> {
        writeln!(self.output, "Invalid input: {err}")
    }

    fn report<T>(&mut self, result: FacadeResult<T>) -> io::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                writeln!(self.output, "Error: {err}")?;
                Ok(None)
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
