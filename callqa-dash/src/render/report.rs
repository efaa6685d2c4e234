//! Report summary, personal particulars and process compliance panels

use super::{
    bullet_list, heading, metric, text_or_na, timestamp_control, yes_no, Element, Node, Surface,
    Target, DASH,
};
use callqa_common::models::{ComplianceCheck, PersonalParticulars, ProcessCompliance, ReportDoc};

pub fn render_summary(doc: &ReportDoc) -> Vec<Node> {
    vec![
        heading("Critical Issues"),
        bullet_list(&doc.summary.critical_issues),
        heading("Recommendations"),
        bullet_list(&doc.summary.recommendations),
    ]
}

pub fn render_particulars(particulars: Option<&PersonalParticulars>) -> Vec<Node> {
    let Some(pp) = particulars else {
        return vec![metric("Personal Particulars", DASH)];
    };

    let proofs: Vec<Node> = if pp.id_proofs.is_empty() {
        vec![Element::new("li").class("empty").text(DASH).into()]
    } else {
        pp.id_proofs
            .iter()
            .map(|proof| {
                let mer = proof.present_in_mer;
                let mut item = Element::new("li").text(format!(
                    "{}: {} (in MER: {})",
                    text_or_na(proof.kind.as_deref()),
                    text_or_na(proof.value.as_deref()),
                    yes_no(mer)
                ));
                if mer == Some(false) {
                    item = item.class("mismatch");
                }
                item.into()
            })
            .collect()
    };

    vec![
        metric("Name", text_or_na(pp.name.as_deref())),
        metric("Date of Birth", text_or_na(pp.dob.as_deref())),
        Element::new("div")
            .class("id-proofs")
            .child(Element::new("span").class("metric-label").text("ID Proofs"))
            .child(Element::new("ul").children(proofs))
            .into(),
        metric("Nominee", text_or_na(pp.nominee_name.as_deref())),
        metric("Nominee Date of Birth", text_or_na(pp.nominee_dob.as_deref())),
    ]
}

fn compliance_row(label: &str, check: Option<&ComplianceCheck>) -> Node {
    let performed = check.and_then(ComplianceCheck::performed);
    let detail = check.and_then(ComplianceCheck::detail);
    let time = check.and_then(|c| c.timestamp.as_deref());

    let mut status = Element::new("span")
        .class("compliance-status")
        .text(yes_no(performed));
    if performed == Some(false) {
        status = status.class("fail");
    }

    Element::new("div")
        .class("compliance")
        .child(Element::new("span").class("metric-label").text(label))
        .child(status)
        .child(Element::new("span").class("compliance-detail").text(text_or_na(detail)))
        .child(timestamp_control(time))
        .into()
}

pub fn render_compliance(compliance: Option<&ProcessCompliance>) -> Vec<Node> {
    vec![
        compliance_row("Disclaimer", compliance.and_then(|c| c.disclaimer.as_ref())),
        compliance_row(
            "Language Preference",
            compliance.and_then(|c| c.language_preference.as_ref()),
        ),
    ]
}

pub fn draw(doc: &ReportDoc, surface: &mut dyn Surface) {
    surface.replace(Target::Summary, render_summary(doc));
    surface.replace(
        Target::Particulars,
        render_particulars(doc.personal_particulars.as_ref()),
    );
    surface.replace(
        Target::Compliance,
        render_compliance(doc.process_compliance.as_ref()),
    );
}
