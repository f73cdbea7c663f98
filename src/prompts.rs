const INPUT_PLACEHOLDER: &str = "{input}";

pub const TEXT_REVIEW_TEMPLATE: &str = r#"You are a senior security architect performing a threat-modeling design review of a web screen.
The input below describes the screen: its forms, fields, methods, hidden inputs and any notes collected from the page.

Return ONLY a self-contained HTML + CSS report suitable for embedding in a browser extension panel.
Do not wrap it in markdown, do not add any preface or closing remarks.

Sections, in order:
0. Executive summary: key observations, overall posture (Good / Needs Improvement / Critical), business impact, next action.
1. Screen overview: form action, HTTP method, fields and their types, hidden or sensitive fields.
2. Security design analysis: transport, method choice, field attributes, CSRF tokens, client-side validation, information leakage.
3. STRIDE threat model: threats, attacker goals, likelihood and impact per category.
4. Recommendations: concrete fixes, headers, safer form practices.
5. Positive observations.
6. Security score from 0 to 10 with a colored badge and a short justification.
7. Manual verification checklist for reviewers.

Input for analysis:
```{input}```
"#;

pub const SCREENSHOT_REVIEW_TEMPLATE: &str = r#"You are a senior security architect performing a threat-modeling design review based solely on the attached screenshot of a screen (web form, app UI or page).
Infer what you can from the visible elements and state your assumptions where the image cannot tell you (for example whether HTTPS is used).

Return ONLY a self-contained HTML + CSS report suitable for embedding in a browser extension panel.
Do not wrap it in markdown, do not add any preface or closing remarks.

Sections, in order:
0. Executive summary: key observations, overall posture (Good / Needs Improvement / Critical), business impact, next action.
1. Screen overview: visible elements and the likely purpose of the screen.
2. Security design analysis from visual cues: field types, masking, sensitive data on display, confusing actions.
3. STRIDE threat model inferred from the design, with likelihood and impact per category.
4. Recommendations focused on UI and the server-side checks they imply.
5. Positive observations.
6. Security score from 0 to 10 with a colored badge and a short justification.
7. Checklist for deeper investigation beyond the screenshot.
"#;

pub fn render_text_review(input: &str) -> String {
    TEXT_REVIEW_TEMPLATE.replacen(INPUT_PLACEHOLDER, input, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_input_once() {
        let rendered = render_text_review("<form action=\"/login\">");
        assert!(rendered.contains("```<form action=\"/login\">```"));
        assert!(!rendered.contains(INPUT_PLACEHOLDER));
    }

    #[test]
    fn test_input_with_placeholder_text_is_not_expanded() {
        let rendered = render_text_review("literal {input}");
        assert!(rendered.contains("```literal {input}```"));
    }

    #[test]
    fn test_screenshot_template_has_no_placeholder() {
        assert!(!SCREENSHOT_REVIEW_TEMPLATE.contains(INPUT_PLACEHOLDER));
    }
}
