/// `MM:SS`, both fields zero padded.
pub fn mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `M:SS`, minutes unpadded.
pub fn m_ss(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn percent(ratio: f64) -> u16 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u16
}

/// Text progress bar of `width` cells.
pub fn bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
