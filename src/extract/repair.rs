//! Known-broken header repairs for paginated-document extraction.
//!
//! Some statement layouts wrap header cells across two physical lines,
//! corrupting the column count of the extracted grid. Each repair is a
//! named strategy keyed by a content signature; new broken layouts are
//! added as new registry entries without touching the merge logic.

/// A format-version-pinned header fix.
pub trait HeaderRepair: Send + Sync {
    fn name(&self) -> &'static str;

    /// Content signature check on the extracted header cells. Cells may
    /// contain embedded newlines from wrapped lines.
    fn detect(&self, header: &[String]) -> bool;

    /// The known-correct header for this layout.
    fn repaired(&self) -> Vec<String>;
}

/// Vested holdings statement. Extraction splits several of its header
/// cells across two lines; the signature is the reassembled
/// "Total Shares Held" column title.
pub struct VestedHoldingsRepair;

const VESTED_HEADER: [&str; 11] = [
    "Ticker",
    "Company Name",
    "Total Shares Held",
    "Average Cost (USD)",
    "Current Price (USD)",
    "Current Value (USD)",
    "Invested Amount (USD)",
    "Unrealized Gain (USD)",
    "Unrealized Gain (%)",
    "Portfolio Weight (%)",
    "Asset Class",
];

impl HeaderRepair for VestedHoldingsRepair {
    fn name(&self) -> &'static str {
        "vested-holdings"
    }

    fn detect(&self, header: &[String]) -> bool {
        let joined = header
            .iter()
            .map(|c| c.replace('\n', " "))
            .collect::<Vec<_>>()
            .join(" ");
        joined.contains("Total Shares Held")
    }

    fn repaired(&self) -> Vec<String> {
        VESTED_HEADER.iter().map(|s| s.to_string()).collect()
    }
}

/// All registered repairs, tried in order.
pub fn repairs() -> Vec<Box<dyn HeaderRepair>> {
    vec![Box::new(VestedHoldingsRepair)]
}

/// Apply the first matching repair whose column count agrees with the
/// extracted header. A count mismatch means the signature is stale for
/// this layout version; the header is left untouched rather than silently
/// misaligning the data.
pub fn repair_header(header: &[String]) -> Vec<String> {
    for repair in repairs() {
        if !repair.detect(header) {
            continue;
        }
        let fixed = repair.repaired();
        if fixed.len() == header.len() {
            log::debug!("header repair '{}' applied", repair.name());
            return fixed;
        }
        log::warn!(
            "header repair '{}' matched but column counts differ ({} vs {}); header left unchanged",
            repair.name(),
            fixed.len(),
            header.len()
        );
    }
    header.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken_header() -> Vec<String> {
        vec![
            "Ticker".into(),
            "Company\nName".into(),
            "Total Shares\nHeld".into(),
            "Average Cost\n(USD)".into(),
            "Current Price\n(USD)".into(),
            "Current Value\n(USD)".into(),
            "Invested\nAmount (USD)".into(),
            "Unrealized\nGain (USD)".into(),
            "Unrealized\nGain (%)".into(),
            "Portfolio\nWeight (%)".into(),
            "Asset Class".into(),
        ]
    }

    #[test]
    fn test_repairs_wrapped_vested_header() {
        let repaired = repair_header(&broken_header());
        assert_eq!(repaired.len(), 11);
        assert_eq!(repaired[2], "Total Shares Held");
        assert_eq!(repaired[3], "Average Cost (USD)");
    }

    #[test]
    fn test_count_mismatch_leaves_header_untouched() {
        // Signature matches but the layout grew a column since the repair
        // was pinned.
        let header = vec![
            "Ticker".into(),
            "Total Shares\nHeld".into(),
            "Average Cost\n(USD)".into(),
        ];
        let repaired = repair_header(&header);
        assert_eq!(repaired, header);
    }

    #[test]
    fn test_unrelated_header_passes_through() {
        let header: Vec<String> = vec!["Symbol".into(), "Shares".into(), "Cost".into()];
        assert_eq!(repair_header(&header), header);
    }
}
