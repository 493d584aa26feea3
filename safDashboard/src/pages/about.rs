use crate::pages::page_output::{PageKind, PageOutput};

const ABOUT_TEXT: &str = "\
Interactive Supplementary Dashboard
Prospective LCA of Sustainable Aviation Fuels
Scenario-Based Assessment Using Integrated Assessment Models (2020-2050)

The dashboard presents the prospective environmental performance of Sustainable
Aviation Fuel (SAF) production pathways, assessed with a harmonised Life Cycle
Assessment (ISO 14040/44) and forward-looking IAM scenarios from 2020 to 2050.";

/// Page list shown under the introduction.
pub fn page_summaries() -> Vec<(PageKind, &'static str)> {
    vec![
        (PageKind::Overview, "Comparative summary of environmental impacts across SAF pathways, GHG and non-GHG indicators."),
        (PageKind::Monetization, "External costs per pathway in €/kg fuel from EF 3.1 based monetization factors."),
        (PageKind::Contribution, "Relative contribution of life-cycle process groups to each fuel's impact profile."),
        (PageKind::Heatmap, "Process-specific burdens across impact categories, highlighting environmental hotspots."),
        (PageKind::Prospective, "Emission trends under the Optimistic, Middle and Pessimistic IAM scenarios up to 2050."),
        (PageKind::RawData, "The life cycle inventory results behind every page, exported for reuse."),
    ]
}

pub fn about_text() -> String {
    let mut text = String::from(ABOUT_TEXT);
    text.push_str("\n\nStructure and Content\n");
    for (page, summary) in page_summaries() {
        text.push_str(&format!("\n{}\n  {}\n", page.title(), summary));
    }
    text
}

pub fn render() -> PageOutput {
    println!("{}", about_text());
    PageOutput::new(PageKind::About)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_data_page() {
        let text = about_text();
        for page in PageKind::ALL.iter().filter(|p| **p != PageKind::About) {
            assert!(text.contains(page.title()), "{} missing", page);
        }
    }
}
