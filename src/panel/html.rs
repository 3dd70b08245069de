use super::{CompoundView, InfoView, LinkedText, TransformationView};
use std::fmt::Write;

const LEGEND_HTML: &str = r#"<div class="info-title">Legend</div>
<div class="help-tip">Click on a node to see its details</div>
<div class="info-subtitle">Node shape</div>
<div class="help-content">
<p><span class="symbol-compound">&#9634;</span> Compound</p>
<p><span class="symbol-transformation">&#9711;</span> Transformation (arrows show direction)</p>
</div>
<div class="info-subtitle">Compound color</div>
<div class="help-content">
<p><span class="symbol-compound source">&#9634;</span> Source</p>
<p><span class="symbol-compound intermediate">&#9634;</span> Intermediate</p>
<p><span class="symbol-compound sink">&#9634;</span> Sink</p>
</div>
<div class="info-title">Loading data</div>
<div class="info-subtitle">Scope</div>
<div class="help-content">
<div class="load-data">&#8627; Load the scope .json file from the search output folder with "Scope file".</div>
</div>
<div class="info-subtitle">Compound depictions</div>
<div class="help-content">
<div class="load-data">&#8627; Load the .svg files from the "svg" subfolder with "Depictions"; select them all at once.</div>
<div class="load-data">&#8627; Files are matched to compounds by name, so they can be loaded before or after the scope.</div>
</div>
"#;

pub fn render_html(view: &InfoView) -> String {
    match view {
        InfoView::Legend => LEGEND_HTML.to_string(),
        InfoView::Compound(compound) => render_compound(compound),
        InfoView::Transformation(transformation) => render_transformation(transformation),
    }
}

// `write!` into a String cannot fail, hence the ignored results below.

fn render_compound(view: &CompoundView) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"info-title\">Compound</div>\n");

    out.push_str("<div class=\"info-name\">\n");
    for name in &view.names {
        let _ = writeln!(out, "{}<br>", link(name));
    }
    out.push_str("</div>\n<div class=\"spacer\"></div>\n");

    if let Some(image) = &view.image {
        let _ = writeln!(
            out,
            "<div class=\"img-box\"><img class=\"img\" alt=\"depiction\" src=\"{}\"></div>",
            escape_html(image)
        );
    }

    section(&mut out, "sink", "Compound in sink?", &escape_html(&view.in_sink));
    structure(&mut out, "smiles", "SMILES:", &view.smiles, "PubChem");
    structure(&mut out, "inchi", "InChI:", &view.inchi, "PubChem");
    structure(&mut out, "inchikey", "InChIKey:", &view.inchikey, "Google");
    out
}

fn render_transformation(view: &TransformationView) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"info-title\">Transformation</div>\n");
    let _ = writeln!(out, "<div class=\"info-name\">{}</div>", escape_html(&view.id));
    out.push_str("<div class=\"spacer\"></div>\n");

    let rules: String = view
        .rule_ids
        .iter()
        .map(|rule| format!("{}<br>", link(rule)))
        .collect();
    section(&mut out, "rule-ids", "Rule ID(s):", &rules);

    let ecs: String = view
        .ec_numbers
        .iter()
        .map(|ec| format!("{}<br>", escape_html(ec)))
        .collect();
    section(&mut out, "ec-numbers", "EC number(s):", &ecs);

    out.push_str("<div class=\"two-cols\">\n");
    section(&mut out, "diameter", "Rule diameter:", &view.diameter.to_string());
    section(&mut out, "iteration", "Iteration:", &view.iteration.to_string());
    out.push_str("</div>\n<div class=\"two-cols\">\n");
    section(&mut out, "score", "Biological score:", &escape_html(&view.score));
    section(&mut out, "score", "Chemical score:", &escape_html(&view.chemical_score));
    out.push_str("</div>\n");

    section(
        &mut out,
        "description",
        "Reaction SMILES:",
        &escape_html(&view.reaction_smiles),
    );
    section(
        &mut out,
        "selenzyme",
        "Enzyme selection:",
        &format!(
            "<a target=\"_blank\" href=\"{}\">Crosslink to Selenzyme</a>",
            escape_html(&view.selenzyme)
        ),
    );
    out
}

/// `body` is inserted as-is and must already be escaped.
fn section(out: &mut String, class: &str, title: &str, body: &str) {
    let _ = writeln!(
        out,
        "<div class=\"{}\">\n<div class=\"info-subtitle\">{}</div>\n<div class=\"raw-text\">{}</div>\n</div>",
        class,
        escape_html(title),
        body
    );
}

fn structure(out: &mut String, class: &str, title: &str, value: &LinkedText, site: &str) {
    let mut body = escape_html(&value.text);
    if let Some(href) = &value.href {
        let _ = write!(
            body,
            "</div>\n<div class=\"link raw-text\"><a target=\"_blank\" href=\"{}\">Look for identical structure using {}</a>",
            escape_html(href),
            site
        );
    }
    section(out, class, title, &body);
}

fn link(value: &LinkedText) -> String {
    match &value.href {
        Some(href) => format!(
            "<a target=\"_blank\" href=\"{}\">{}</a>",
            escape_html(href),
            escape_html(&value.text)
        ),
        None => escape_html(&value.text),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
