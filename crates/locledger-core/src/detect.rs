//! Ledger report format detection

use regex::Regex;

/// Check whether extracted text is a General Ledger detail report
///
/// Recognizes the report title ("General Ledger"), the report number
/// ("GL 505") or any `Acct: NNNN` section header. A `false` result means the
/// row pipeline must not run.
pub fn is_ledger_format(text: &str) -> bool {
    if text.contains("General Ledger") || text.contains("GL 505") {
        return true;
    }

    let acct_re = Regex::new(r"Acct:\s*\d{4}").expect("valid regex");
    acct_re.is_match(text)
}
