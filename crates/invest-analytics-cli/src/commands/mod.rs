pub mod indicators;
pub mod optimizer;
pub mod risk;

use invest_analytics_core::ReturnFrequency;

/// Parse a `--frequency` argument into a core frequency.
pub fn parse_frequency(s: &str) -> Result<ReturnFrequency, Box<dyn std::error::Error>> {
    match s.to_lowercase().as_str() {
        "daily" => Ok(ReturnFrequency::Daily),
        "calendar-daily" | "calendar" => Ok(ReturnFrequency::CalendarDaily),
        "weekly" => Ok(ReturnFrequency::Weekly),
        "monthly" => Ok(ReturnFrequency::Monthly),
        "quarterly" => Ok(ReturnFrequency::Quarterly),
        "annual" | "annually" => Ok(ReturnFrequency::Annual),
        _ => Err(format!(
            "Unknown frequency '{}'. Use: daily, calendar-daily, weekly, monthly, quarterly, annual",
            s
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frequency_aliases() {
        assert_eq!(parse_frequency("Daily").unwrap(), ReturnFrequency::Daily);
        assert_eq!(
            parse_frequency("calendar").unwrap(),
            ReturnFrequency::CalendarDaily
        );
        assert_eq!(
            parse_frequency("annually").unwrap(),
            ReturnFrequency::Annual
        );
        assert!(parse_frequency("hourly").is_err());
    }
}
