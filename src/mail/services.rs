use lazy_static::lazy_static;
use lettre::{message::Mailbox, Address};
use regex::Regex;

pub const SUBJECT: &str = "💌 당신의 특별한 고백 편지가 도착했어요! 💌";

const MISSING_CODE: &str = "코드를 불러올 수 없습니다.";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    // The relay accepts only what lettre can parse as a bare address.
    EMAIL_RE.is_match(email)
        && email.parse::<Address>().is_ok()
        && email.parse::<Mailbox>().is_ok()
}

/// HTML body of the scenario letter. `latest_code` is the most recently
/// issued verification code, if any.
pub fn render_email(scenario_text: &str, latest_code: Option<&str>) -> String {
    let code = latest_code.unwrap_or(MISSING_CODE);
    format!(
        r#"<html>
<body>
    <p>안녕하세요! 당신을 위한 편지가 도착했습니다.</p>
    <p>이 시나리오를 통해 좋은 결과가 있기를 진심으로 바랍니다.</p>

    <hr/>
    <h3>고백_Go의 편지</h3>
    <pre>{scenario}</pre>
    <hr/>

    <h3>중요: 당신의 보안 코드</h3>
    <p>이 코드는 편지 보관함에서 시나리오를 다시 확인할 때 필요합니다.</p>
    <p>잊어버리지 않도록 잘 보관해주세요.</p>

    <p><strong>[보안 코드]: <span style="font-size: 1.2em; color: #007bff;">{code}</span></strong></p>

    <hr/>
    <p>행운을 빌어요!!</p>
</body>
</html>
"#,
        scenario = escape_html(scenario_text),
        code = code,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
