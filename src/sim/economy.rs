use crate::sim::factories::Factory;
use std::time::Duration;

/// Sum of buying `quantity` units starting at `cost`, each unit `growth`
/// times pricier than the last: `cost * (1 - growth^q) / (1 - growth)`.
/// The result is quoted to twelve significant digits so the closed form's
/// rounding residue does not push an exact price past an exact balance.
/// Overflowing series come out as `f64::INFINITY`.
pub fn geometric_total_cost(cost: f64, growth: f64, quantity: u32) -> f64 {
    if quantity == 0 {
        return 0.0;
    }
    if (growth - 1.0).abs() < f64::EPSILON {
        return quote_price(cost * quantity as f64);
    }
    quote_price(cost * ((1.0 - growth.powf(quantity as f64)) / (1.0 - growth)))
}

fn quote_price(total: f64) -> f64 {
    if !total.is_finite() || total <= 0.0 {
        return total;
    }
    let exponent = 11 - total.log10().floor() as i32;
    let scale = 10f64.powi(exponent);
    let quoted = (total * scale).round() / scale;
    if quoted.is_finite() { quoted } else { total }
}

/// Per-second output one more unit of `factory` adds to its resource.
pub fn unit_output(factory: &Factory, prestige_multiplier: f64, global_multiplier: f64) -> f64 {
    factory.base_output * factory.efficiency * prestige_multiplier * global_multiplier
}

/// Per-second output all owned units of `factory` currently contribute.
pub fn owned_output(factory: &Factory, prestige_multiplier: f64, global_multiplier: f64) -> f64 {
    factory.count as f64 * unit_output(factory, prestige_multiplier, global_multiplier)
}

/// Time away actually credited once the cap is applied.
pub fn credited_offline_time(elapsed: Duration, cap: Duration) -> Duration {
    elapsed.min(cap)
}

pub fn offline_accrual(per_second: f64, credited: Duration, efficiency: f64) -> f64 {
    (per_second * credited.as_secs_f64() * efficiency).max(0.0)
}
