//! Device list walkthrough: lookups, click-to-sort, debounced search and
//! remembered preferences

use std::sync::Arc;
use std::time::Duration;

use roster::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const DEVICES_JSON: &str = r#"[
    {"id": 1, "client_id": 1, "name": "Boiler", "serial_number": "0981", "location_id": 2, "device_type_id": 1},
    {"id": 2, "client_id": 1, "name": "air handler", "serial_number": "12", "location_id": 1, "device_type_id": 2},
    {"id": 3, "client_id": 2, "name": "Chiller", "serial_number": null, "location_id": 9, "written_off": true},
    {"id": 4, "client_id": 2, "name": "boiler", "serial_number": "A-77", "location_id": 1, "device_type_id": 1}
]"#;

const MAINTENANCES_JSON: &str = r#"[
    {"id": 10, "client_id": 1, "device_id": 1, "name": "Yearly check", "scheduled_at": "2024-03-01"},
    {"id": 11, "client_id": 1, "device_id": 2, "name": "Filter swap", "scheduled_at": "05.01.2024", "completed_at": "06.01.2024 14:30", "is_completed": true}
]"#;

fn print_rows<R: Record>(title: &str, view: &ListView<R>, columns: &[&str]) {
    println!("\n{} [{}]", title, view.sort_state());
    let headers: Vec<String> = columns
        .iter()
        .map(|c| format!("{} {}", c, view.indicator(c)))
        .collect();
    println!("  {}", headers.join(" | "));

    match view.render() {
        Rendered::Rows(rows) => {
            for row in rows {
                let cells: Vec<String> = columns.iter().map(|c| row.field_value(c).to_text()).collect();
                println!("  {}", cells.join(" | "));
            }
        }
        Rendered::Empty { message } => println!("  ({})", message),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = ViewsConfig::from_yaml_str(
        r#"
views:
  - name: devices
    unknown_label: "(no location)"
"#,
    )?;
    let catalog = ViewCatalog::with_settings(&settings)?;

    let devices: Vec<Device> = serde_json::from_str(DEVICES_JSON)?;
    let maintenances: Vec<Maintenance> = serde_json::from_str(MAINTENANCES_JSON)?;
    let locations = vec![
        Location { id: 1, client_id: Some(1), name: "Roof".to_string(), address: None },
        Location { id: 2, client_id: Some(1), name: "Basement".to_string(), address: None },
    ];
    let device_types = LookupTable::from_pairs([(1, "Heating"), (2, "Ventilation")]);

    let mut view = ListView::new(catalog.devices.clone())
        .with_records(devices.clone())
        .with_lookup(tables::LOCATIONS, LookupTable::from_records(&locations, "id", "name"))
        .with_lookup(tables::DEVICE_TYPES, device_types);

    let columns = ["id", "name", "serial_number", "location_id", "device_type_id"];
    print_rows("Devices", &view, &columns);

    view.on_header_click("location_id");
    print_rows("Devices by location", &view, &columns);

    view.on_header_click("location_id");
    print_rows("Devices by location, descending", &view, &columns);

    // Keystrokes arrive faster than the quiet window; only the last one filters
    let (tx, mut rx) = mpsc::unbounded_channel();
    let search = Debouncer::spawn(Duration::from_millis(50), move |text: String| {
        let _ = tx.send(text);
    });
    for text in ["b", "bo", "boi"] {
        search.push(text.to_string());
    }
    if let Some(text) = rx.recv().await {
        view.set_text(text);
        print_rows("Devices matching 'boi'", &view, &columns);
    }

    view.set_flag("written_off", Some(true));
    print_rows("Written-off devices matching 'boi'", &view, &columns);
    view.clear_filters();

    let mut client_view = ListView::new(catalog.client_devices.clone())
        .with_records(attach_last_activity(&devices, &maintenances, &[]));
    client_view.set_exact("client_id", Some(FieldValue::Integer(1)));
    print_rows("Client 1 devices", &client_view, &["name", LAST_ACTIVITY]);

    let preferences = Preferences::new(Arc::new(InMemoryPreferenceStore::new()));
    preferences.set_last_visited_device(4).await?;
    preferences.set_sort_state(DEVICES_VIEW, view.sort_state()).await?;
    let mut visibility = ColumnVisibility::new();
    visibility.set_visible("serial_number", false);
    preferences.set_column_visibility(DEVICES_VIEW, &visibility).await?;

    println!(
        "\nRemembered: device {:?}, sort {:?}, columns {:?}",
        preferences.last_visited_device().await?,
        preferences.sort_state(DEVICES_VIEW).await?.map(|s| s.to_string()),
        preferences
            .column_visibility(DEVICES_VIEW)
            .await?
            .visible_columns(&columns),
    );

    Ok(())
}

const DEVICES_VIEW: &str = roster::views::DEVICES;
