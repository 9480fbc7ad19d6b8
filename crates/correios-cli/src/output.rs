//! Terminal rendering of sensors and tracking outcomes.

use std::fmt::Write as _;

use correios_core::{Place, ShipmentSensor, TrackingOutcome};

pub(crate) fn sensor_json(sensor: &ShipmentSensor) -> serde_json::Value {
    let attributes: serde_json::Map<String, serde_json::Value> = sensor
        .attributes()
        .into_iter()
        .map(|(k, v)| (k.to_owned(), serde_json::Value::String(v)))
        .collect();

    serde_json::json!({
        "name": sensor.name(),
        "unique_id": sensor.unique_id(),
        "state": sensor.state(),
        "icon": sensor.icon(),
        "color": sensor.color(),
        "attributes": attributes,
        "last_refreshed": sensor.last_refreshed(),
    })
}

pub(crate) fn sensor_text(sensor: &ShipmentSensor) -> String {
    let mut out = format!(
        "{}\n  state: {}\n  icon:  {} ({})\n",
        sensor.name(),
        sensor.state().unwrap_or("-"),
        sensor.icon().unwrap_or("-"),
        sensor.color().unwrap_or("-"),
    );
    for (label, value) in sensor.attributes() {
        if !value.is_empty() {
            let _ = writeln!(out, "  {label}: {value}");
        }
    }
    out
}

pub(crate) fn print_sensor(sensor: &ShipmentSensor, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&sensor_json(sensor))?);
    } else {
        print!("{}", sensor_text(sensor));
    }
    Ok(())
}

pub(crate) fn print_outcome(outcome: &TrackingOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!("status: {}", outcome.status_label());
    if let Some(record) = outcome.record() {
        println!("when:   {}", record.when().display());
        match record.place() {
            Place::AtLocation { place } => println!("place:  {place}"),
            Place::InTransit {
                origin,
                destination,
            } => {
                println!("origin: {origin}");
                println!("destination: {destination}");
            }
        }
    }
    Ok(())
}
