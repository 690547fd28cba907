//! Terminal rendering for API records.
//!
//! Listings are sorted by their display key before printing. Sorting is
//! stable, so records with equal keys keep the order the API returned.

use std::io::{self, Write};

use crate::api::{Capacity, Device, Facility, OperatingSystem, Plan};

fn sorted_by<'a, T, K, F>(items: &'a [T], key: F) -> Vec<&'a T>
where
    K: Ord + ?Sized + 'a,
    F: Fn(&'a T) -> &'a K,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| key(*a).cmp(key(*b)));
    sorted
}

/// Print devices sorted by hostname.
///
/// # Errors
/// Returns error if writing fails.
pub fn print_devices<W: Write + ?Sized>(out: &mut W, devices: &[Device]) -> io::Result<()> {
    writeln!(out, "Devices:")?;
    for device in sorted_by(devices, |d| d.hostname.as_str()) {
        writeln!(
            out,
            "  {}: {} State: {}",
            device.id, device.hostname, device.state
        )?;
    }
    if devices.is_empty() {
        writeln!(out, "  No devices")?;
    }
    Ok(())
}

/// Print facilities sorted by name.
///
/// # Errors
/// Returns error if writing fails.
pub fn print_facilities<W: Write + ?Sized>(out: &mut W, facilities: &[Facility]) -> io::Result<()> {
    writeln!(out, "Facilities:")?;
    for facility in sorted_by(facilities, |f| f.name.as_str()) {
        writeln!(out, "  {} (code: {})", facility.name, facility.code)?;
    }
    if facilities.is_empty() {
        writeln!(out, "  No facilities")?;
    }
    Ok(())
}

/// Print plans sorted by name.
///
/// # Errors
/// Returns error if writing fails.
pub fn print_plans<W: Write + ?Sized>(out: &mut W, plans: &[Plan]) -> io::Result<()> {
    writeln!(out, "Plans:")?;
    for plan in sorted_by(plans, |p| p.name.as_str()) {
        writeln!(out, "  {} (slug: {})", plan.name, plan.slug)?;
    }
    if plans.is_empty() {
        writeln!(out, "  No plans")?;
    }
    Ok(())
}

/// Print operating systems sorted by name.
///
/// # Errors
/// Returns error if writing fails.
pub fn print_operating_systems<W: Write + ?Sized>(
    out: &mut W,
    operating_systems: &[OperatingSystem],
) -> io::Result<()> {
    writeln!(out, "Operating Systems:")?;
    for os in sorted_by(operating_systems, |o| o.name.as_str()) {
        writeln!(out, "  {} (slug: {})", os.name, os.slug)?;
    }
    if operating_systems.is_empty() {
        writeln!(out, "  No operating systems")?;
    }
    Ok(())
}

/// Print capacity per facility, then per plan. Both levels are sorted by key.
///
/// # Errors
/// Returns error if writing fails.
pub fn print_capacity<W: Write + ?Sized>(out: &mut W, capacity: &Capacity) -> io::Result<()> {
    writeln!(out, "Capacity:")?;
    for (facility, plans) in capacity {
        writeln!(out, "  Facility: {facility}")?;
        for (plan, level) in plans {
            writeln!(out, "    {plan}:")?;
            writeln!(out, "      State: {}", level.level)?;
            match level.servers {
                Some(servers) => writeln!(out, "      Servers: {servers}")?,
                None => writeln!(out, "      Servers: unknown")?,
            }
        }
    }
    if capacity.is_empty() {
        writeln!(out, "  No capacity")?;
    }
    Ok(())
}

/// Print API error messages with a count header.
///
/// # Errors
/// Returns error if writing fails.
pub fn print_errors<W: Write + ?Sized>(out: &mut W, errors: &[String]) -> io::Result<()> {
    writeln!(out, "({}) Errors:", errors.len())?;
    for error in errors {
        writeln!(out, "  {error}")?;
    }
    if errors.is_empty() {
        writeln!(out, "  None")?;
    }
    Ok(())
}
