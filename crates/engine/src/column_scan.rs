use regex::Regex;

use crate::model::{ColumnNoise, ColumnSuspicion, RawTable};

/// Fraction of non-empty cells that must match before a column is flagged.
const SUSPICION_RATIO: f64 = 0.5;

/// Column-wide noise screening, the legacy front-end that predates per-cell
/// cleaning: drop whole columns suspected of holding serials, IPs, MACs, or
/// dates before any model column is chosen.
///
/// The pattern set is deliberately looser than the token cleaner's (lax IP
/// shape without octet validation, mixed MAC separators, wider date
/// shapes). The two sets are kept separate on purpose; any unification is
/// a product decision, not a refactor.
pub fn scan_columns(table: &RawTable) -> Vec<ColumnSuspicion> {
    let patterns = LaxPatterns::compile();
    let mut suspicions = Vec::new();

    for (index, header) in table.headers.iter().enumerate() {
        let mut non_empty = 0usize;
        let mut hits = [0usize; 4]; // serial, ip, mac, date

        for row in &table.rows {
            let cell = match row.get(index) {
                Some(c) => c.trim(),
                None => continue,
            };
            if cell.is_empty() {
                continue;
            }
            non_empty += 1;
            if looks_like_serial(cell) {
                hits[0] += 1;
            }
            if patterns.ip.is_match(cell) {
                hits[1] += 1;
            }
            if patterns.mac.is_match(cell) {
                hits[2] += 1;
            }
            if patterns.date.is_match(cell) {
                hits[3] += 1;
            }
        }

        if non_empty == 0 {
            continue;
        }

        let kinds = [
            ColumnNoise::Serial,
            ColumnNoise::Ip,
            ColumnNoise::Mac,
            ColumnNoise::Date,
        ];
        let best = (0..4).max_by(|a, b| hits[*a].cmp(&hits[*b]));
        if let Some(k) = best {
            let ratio = hits[k] as f64 / non_empty as f64;
            if ratio > SUSPICION_RATIO {
                suspicions.push(ColumnSuspicion {
                    index,
                    header: header.clone(),
                    kind: kinds[k],
                    ratio,
                });
            }
        }
    }

    suspicions
}

/// Long run of letters and digits with a meaningful share of both.
fn looks_like_serial(cell: &str) -> bool {
    let chars: Vec<char> = cell.chars().collect();
    if chars.len() < 10 || !chars.iter().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let digits = chars.iter().filter(|c| c.is_ascii_digit()).count();
    let letters = chars.len() - digits;
    digits >= 4 && letters >= 2
}

struct LaxPatterns {
    ip: Regex,
    mac: Regex,
    date: Regex,
}

impl LaxPatterns {
    fn compile() -> Self {
        Self {
            // No octet range validation; any dotted quad of digits counts.
            ip: Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").unwrap(),
            // Mixed separators accepted, unlike the per-token cleaner.
            mac: Regex::new(
                r"^(?:[0-9A-Fa-f]{2}[:\-]){5}[0-9A-Fa-f]{2}$|^(?:[0-9A-Fa-f]{4}\.){2}[0-9A-Fa-f]{4}$",
            )
            .unwrap(),
            date: Regex::new(r"^\d{1,4}[/\-.]\d{1,2}[/\-.]\d{1,4}$").unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn flags_ip_column() {
        let t = table(
            &["Model", "Address"],
            &[
                &["CamA", "10.0.0.1"],
                &["CamB", "10.0.0.2"],
                &["CamC", "999.1.1.1"], // lax shape still counts
            ],
        );
        let suspicions = scan_columns(&t);
        assert_eq!(suspicions.len(), 1);
        assert_eq!(suspicions[0].index, 1);
        assert_eq!(suspicions[0].kind, ColumnNoise::Ip);
        assert_eq!(suspicions[0].ratio, 1.0);
    }

    #[test]
    fn flags_serial_column() {
        let t = table(
            &["Serial"],
            &[&["ACCC8E123456"], &["B8A44F09D211"], &["n/a"]],
        );
        let suspicions = scan_columns(&t);
        assert_eq!(suspicions.len(), 1);
        assert_eq!(suspicions[0].kind, ColumnNoise::Serial);
    }

    #[test]
    fn flags_date_column_with_two_digit_year() {
        // Lax date shape allows forms the token cleaner would keep
        let t = table(&["Installed"], &[&["1/2/23"], &["12/30/23"]]);
        let suspicions = scan_columns(&t);
        assert_eq!(suspicions.len(), 1);
        assert_eq!(suspicions[0].kind, ColumnNoise::Date);
    }

    #[test]
    fn model_column_not_flagged() {
        let t = table(
            &["Model"],
            &[&["P3245-LVE"], &["DS-2CD2143G0-I"], &["CAM-7"]],
        );
        assert!(scan_columns(&t).is_empty());
    }

    #[test]
    fn minority_noise_below_ratio_not_flagged() {
        let t = table(
            &["Mixed"],
            &[&["P3245-LVE"], &["10.0.0.1"], &["CAM-7"]],
        );
        assert!(scan_columns(&t).is_empty());
    }

    #[test]
    fn empty_column_ignored() {
        let t = table(&["Model", "Blank"], &[&["CamA", ""], &["CamB", ""]]);
        assert!(scan_columns(&t).is_empty());
    }

    #[test]
    fn mac_with_mixed_separators_counts() {
        let t = table(&["HW"], &[&["00:1A-2B:3C-4D:5E"], &["00:1A:2B:3C:4D:5E"]]);
        let suspicions = scan_columns(&t);
        assert_eq!(suspicions.len(), 1);
        assert_eq!(suspicions[0].kind, ColumnNoise::Mac);
    }
}
