/// Previous/next targets are `None` when the control is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub current: u32,
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub pages: Vec<u32>,
}

impl PageControls {
    pub fn new(current: u32, total_pages: u32) -> Self {
        let current = current.clamp(1, total_pages.max(1));
        Self {
            current,
            previous: (current > 1).then(|| current - 1),
            next: (current < total_pages).then(|| current + 1),
            pages: (1..=total_pages).collect(),
        }
    }
}

/// `< prev  1 [2] 3  next >`, with disabled ends shown in parentheses.
pub fn render(controls: &PageControls) -> String {
    let previous = match controls.previous {
        Some(_) => "< prev",
        None => "(prev)",
    };
    let next = match controls.next {
        Some(_) => "next >",
        None => "(next)",
    };
    let pages: Vec<String> = controls
        .pages
        .iter()
        .map(|page| {
            if *page == controls.current {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    format!("{previous}  {}  {next}", pages.join(" "))
}

#[cfg(test)]
#[path = "../tests/pagination_tests.rs"]
mod tests;
