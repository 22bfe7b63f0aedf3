//! Turns the structured fields of a create request into the display strings
//! stored as specification rows. An empty result means "nothing to store".

use crate::{dto::products::ProductCreateRequest, models::SpecEntry};

pub const CHIPSET: &str = "Chipset";
pub const RAM: &str = "RAM";
pub const ROM: &str = "ROM";
pub const DISPLAY: &str = "Display";
pub const REFRESH_RATE: &str = "Refresh Rate";
pub const BATTERY: &str = "Battery";
pub const CHARGING: &str = "Charging";
pub const CAMERA: &str = "Camera";
pub const OPERATING_SYSTEM: &str = "Operating System";
pub const CONNECTIVITY: &str = "Connectivity";

pub fn format_ram(size_gb: i32, generation: &str) -> String {
    if size_gb <= 0 {
        return String::new();
    }
    match generation.trim() {
        "" => format!("{size_gb} GB"),
        generation => format!("{size_gb} GB {generation}"),
    }
}

pub fn format_storage(value: i32, unit: &str, storage_type: &str) -> String {
    if value <= 0 {
        return String::new();
    }
    let unit = match unit.trim() {
        "" => "GB",
        unit => unit,
    };
    match storage_type.trim() {
        "" => format!("{value} {unit}"),
        storage_type => format!("{value} {unit} {storage_type}"),
    }
}

pub fn format_display(inch: f64) -> String {
    if !inch.is_finite() || inch <= 0.0 {
        return String::new();
    }
    format!("{inch:.1} inch")
}

pub fn format_refresh_rate(hz: i32) -> String {
    if hz <= 0 {
        return String::new();
    }
    format!("{hz} Hz")
}

pub fn format_os(name: &str, version: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }
    match version.trim() {
        "" => name.to_string(),
        version => format!("{name} {version}"),
    }
}

pub fn format_connectivity(five_g: bool, wifi: bool, nfc: bool) -> String {
    [(five_g, "5G"), (wifi, "Wi-Fi"), (nfc, "NFC")]
        .into_iter()
        .filter_map(|(enabled, label)| enabled.then_some(label))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The ten specs of a new product at their fixed positions, starting at 1.
/// Positions do not shift when a value is empty.
pub fn canonical_specs(req: &ProductCreateRequest) -> Vec<SpecEntry> {
    let values = [
        (CHIPSET, req.chipset.clone()),
        (RAM, format_ram(req.ram_gb, &req.ram_ddr)),
        (ROM, format_storage(req.rom_value, &req.rom_unit, &req.storage_type)),
        (DISPLAY, format_display(req.display_inch)),
        (REFRESH_RATE, format_refresh_rate(req.refresh_rate_hz)),
        (BATTERY, req.battery.clone()),
        (CHARGING, req.charging.clone()),
        (CAMERA, req.camera.clone()),
        (OPERATING_SYSTEM, format_os(&req.os_name, &req.os_version)),
        (
            CONNECTIVITY,
            format_connectivity(
                req.connectivity_5g,
                req.connectivity_wifi,
                req.connectivity_nfc,
            ),
        ),
    ];

    values
        .into_iter()
        .zip(1..)
        .map(|((key, value), display_order)| SpecEntry {
            key,
            value,
            display_order,
        })
        .collect()
}
