use k8s_openapi::api::core::v1::Event;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::List;

use super::printer::{list_table, require, PrintHandler};
use super::Options;
use crate::component::{table_cols, Component, Table, TableRow, Timestamp};
use crate::error::{PrintError, ResultExt};
use crate::store::Key;
use crate::utils::dynamic_to_typed;

const EVENT_COLUMNS: &[&str] = &["Kind", "Message", "Reason", "Type", "First Seen", "Last Seen"];
const OBJECT_EVENT_COLUMNS: &[&str] = &["Message", "Reason", "Type", "First Seen", "Last Seen", "From", "Count"];

#[derive(Debug, Clone, Default)]
pub struct EventListPrinter;

impl PrintHandler for EventListPrinter {
    type Object = List<Event>;

    #[tracing::instrument(skip_all)]
    fn print(&self, list: Option<&List<Event>>, options: &Options) -> Result<Component, PrintError> {
        let list = require(list, "event list")?;
        list_table("Events", "There are no events!", EVENT_COLUMNS, &list.items, |event| {
            Ok(event_cells(TableRow::new(), event).with("Kind", involved_object(event, options)?))
        })
    }
}

fn involved_object(event: &Event, options: &Options) -> Result<Component, PrintError> {
    let obj = &event.involved_object;
    let kind = obj.kind.as_deref().unwrap_or_default();
    let text = match obj.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(Component::text(kind)),
    };
    let link = options
        .link
        .for_object(
            obj.api_version.as_deref().unwrap_or_default(),
            kind,
            text,
            obj.namespace.as_deref(),
            &format!("{kind} {text}"),
        )
        .context("link involved object")?;
    Ok(link.into())
}

fn first_seen(event: &Event) -> Component {
    match (&event.first_timestamp, &event.event_time) {
        (Some(t), _) => Timestamp::from(t).into(),
        (None, Some(t)) => Timestamp::from(t.0).into(),
        _ => Component::text("<unknown>"),
    }
}

fn last_seen(event: &Event) -> Component {
    match (&event.last_timestamp, &event.event_time) {
        (Some(t), _) => Timestamp::from(t).into(),
        (None, Some(t)) => Timestamp::from(t.0).into(),
        _ => first_seen(event),
    }
}

fn event_cells(row: TableRow, event: &Event) -> TableRow {
    row.with("Message", Component::text(event.message.clone().unwrap_or_default()))
        .with("Reason", Component::text(event.reason.clone().unwrap_or_default()))
        .with("Type", Component::text(event.type_.clone().unwrap_or_default()))
        .with("First Seen", first_seen(event))
        .with("Last Seen", last_seen(event))
}

/// Events whose involved object is `meta`, newest first.
pub fn object_events_table(meta: &ObjectMeta, options: &Options) -> Result<Table, PrintError> {
    let mut table = Table::new("Events", "There are no events!", table_cols(OBJECT_EVENT_COLUMNS));
    let Some(uid) = meta.uid.as_deref() else {
        return Ok(table);
    };

    let key = Key::new("v1", "Event").namespace(meta.namespace.as_deref());
    for obj in options.object_store().list(&key)? {
        let event: Event = dynamic_to_typed(&obj)?;
        if event.involved_object.uid.as_deref() != Some(uid) {
            continue;
        }
        let from = event
            .reporting_component
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| event.source.as_ref().and_then(|s| s.component.clone()))
            .unwrap_or_default();
        let row = event_cells(TableRow::new(), &event)
            .with("From", Component::text(from))
            .with("Count", Component::text(event.count.unwrap_or(1).to_string()));
        table.add(row);
    }

    table.sort("Last Seen", true);
    Ok(table)
}
