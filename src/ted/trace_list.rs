//! Trace-number lists as written in the `ANL` column: `1;2;5-8;12`

/// A parsed trace list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceList {
    /// Trace numbers, in the order written
    pub traces: Vec<u32>,

    /// Tokens that are not a trace number or an ascending `a-b` range
    pub skipped: Vec<String>,
}

/// Parse a trace list, keeping the tokens that could not be read
///
/// Tokens are separated by `;` and are either a single number or an
/// inclusive `a-b` range.
pub fn parse_trace_list(list: &str) -> TraceList {
    let mut parsed = TraceList::default();

    for token in list.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        let traces = match token.split_once('-') {
            Some((start, end)) => match (parse_trace(start), parse_trace(end)) {
                (Some(start), Some(end)) if start <= end => Some(start..=end),
                _ => None,
            },
            None => parse_trace(token).map(|n| n..=n),
        };
        match traces {
            Some(range) => parsed.traces.extend(range),
            None => parsed.skipped.push(token.to_string()),
        }
    }

    parsed
}

/// Expand a trace list into trace numbers, in the order written
///
/// Inverted ranges and non-numeric tokens are logged and skipped.
pub fn expand_trace_list(list: &str) -> Vec<u32> {
    let parsed = parse_trace_list(list);
    for token in &parsed.skipped {
        log::error!("Skipping trace list token '{}'", token);
    }
    parsed.traces
}

/// Join trace numbers with `;`, in the order given
pub fn join_trace_list(traces: &[u32]) -> String {
    traces
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Sort, de-duplicate and compress trace numbers into ranges (`1-3;5`)
pub fn compress_trace_list(traces: &[u32]) -> String {
    let mut sorted = traces.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut parts = Vec::new();
    let mut iter = sorted.into_iter().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while let Some(next) = end.checked_add(1) {
            if iter.peek() != Some(&next) {
                break;
            }
            end = next;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
    }
    parts.join(";")
}

fn parse_trace(token: &str) -> Option<u32> {
    let token = token.trim();
    // Spreadsheets may hand back whole numbers as "3.0"
    token
        .parse::<u32>()
        .ok()
        .or_else(|| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
                .map(|v| v as u32)
        })
}
