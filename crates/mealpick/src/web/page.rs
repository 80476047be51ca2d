//! HTML for the single page the app serves.
//!
//! Everything is rendered through `Display`; user-provided text always goes
//! through [`Escaped`].

use std::fmt::{self, Display, Formatter};

use mealpick_types::form::{FormChoice, FormRecord, PartySize};

use super::render::markdown_to_html;

pub const TITLE: &str = "상황 맞춤 식사 메뉴 추천기";
pub const INTRO: &str = "아래 상황을 입력하면, ChatGPT가 오늘 먹기 좋은 메뉴를 추천해 줍니다.";
pub const SUBMIT_LABEL: &str = "메뉴 추천 받기";
pub const REGENERATE_LABEL: &str = "메뉴가 마음에 안 들어요, 다시 추천해줘";
pub const RESULT_HEADING: &str = "추천 결과";
pub const SPINNER_TEXT: &str = "메뉴를 고민하는 중입니다...";
pub const FAILURE_TEXT: &str = "추천을 가져오지 못했습니다. 잠시 후 다시 시도해주세요.";

const NOTES_PLACEHOLDER: &str =
    "예: 가볍게, 술안주 위주, 건강식, 빨리 먹을 수 있게, 느끼한 건 싫어요, 토마토가 들어간 요리 등";

const STYLE: &str = r#"<style>
    body { font-family: sans-serif; max-width: 720px; margin: 24px auto; padding: 0 16px; line-height: 1.5; }
    label, legend { display: block; margin-top: 12px; font-weight: 600; }
    input[type=text], input[type=number], select, textarea { width: 100%; padding: 6px; box-sizing: border-box; }
    fieldset { border: none; padding: 0; margin: 0; }
    fieldset label { display: inline; font-weight: normal; margin-right: 12px; }
    button { margin-top: 16px; padding: 8px 16px; }
    .error { background: #fdecea; color: #611a15; padding: 12px; border-radius: 4px; margin-top: 16px; }
    #spinner { margin-top: 16px; }
</style>"#;

const SCRIPT: &str = r#"<script>
    document.querySelectorAll("form").forEach(function (form) {
        form.addEventListener("submit", function () {
            document.querySelectorAll("button").forEach(function (button) { button.disabled = true; });
            document.getElementById("spinner").hidden = false;
        });
    });
</script>"#;

/// HTML-escapes the wrapped text when displayed.
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Empty,
    /// Markdown returned by the model.
    Answer(String),
    /// The completion call failed; the detail is shown under the notice.
    Failed(String),
}

pub struct Page<'a> {
    pub form: &'a FormRecord,
    pub can_regenerate: bool,
    pub outcome: &'a Outcome,
}

impl Display for Page<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="ko">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"<meta charset="UTF-8">"#)?;
        writeln!(
            f,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#
        )?;
        writeln!(f, "<title>{TITLE}</title>")?;
        writeln!(f, "{STYLE}")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<h1>{TITLE}</h1>")?;
        writeln!(f, "<p>{INTRO}</p>")?;

        write!(f, "{}", FormSection(self.form))?;

        writeln!(f, "<hr>")?;
        writeln!(f, r#"<form method="post" action="/regenerate">"#)?;
        let disabled = if self.can_regenerate { "" } else { " disabled" };
        writeln!(
            f,
            r#"<button id="regenerate-button" type="submit"{disabled}>{REGENERATE_LABEL}</button>"#
        )?;
        writeln!(f, "</form>")?;
        writeln!(f, r#"<p id="spinner" hidden>{SPINNER_TEXT}</p>"#)?;

        match self.outcome {
            Outcome::Empty => writeln!(f, r#"<section id="result"></section>"#)?,
            Outcome::Answer(markdown) => {
                writeln!(f, r#"<section id="result">"#)?;
                writeln!(f, "<h3>{RESULT_HEADING}</h3>")?;
                write!(f, "{}", markdown_to_html(markdown))?;
                writeln!(f, "</section>")?;
            }
            Outcome::Failed(detail) => {
                writeln!(
                    f,
                    r#"<div class="error" role="alert">{FAILURE_TEXT}<br><code>{}</code></div>"#,
                    Escaped(detail)
                )?;
                writeln!(f, r#"<section id="result"></section>"#)?;
            }
        }

        writeln!(f, "{SCRIPT}")?;
        writeln!(f, "</body>")?;
        write!(f, "</html>")
    }
}

struct FormSection<'a>(&'a FormRecord);

impl Display for FormSection<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let form = self.0;

        writeln!(f, r#"<form method="post" action="/recommend">"#)?;
        writeln!(f, r#"<label for="party_size">인원 수</label>"#)?;
        writeln!(
            f,
            r#"<input id="party_size" name="party_size" type="number" min="{}" max="{}" step="1" value="{}" required>"#,
            PartySize::MIN,
            PartySize::MAX,
            form.party_size
        )?;
        write!(
            f,
            "{}",
            Select::new("relationship", "함께 먹는 사람과의 관계", form.relationship)
        )?;
        write!(f, "{}", Select::new("meal_time", "식사 시간대", form.meal_time))?;
        write!(f, "{}", TextInput::new("last_meal", "최근 먹은 음식", &form.last_meal))?;
        write!(f, "{}", Radio::new("dining_mode", "식사 형태", form.dining_mode))?;
        write!(f, "{}", Select::new("budget", "1인당 예산", form.budget))?;
        write!(f, "{}", Select::new("spice", "매운맛 선호도", form.spice))?;
        write!(
            f,
            "{}",
            TextInput::new(
                "restrictions",
                "알레르기 / 금지 음식 (없으면 비워두기)",
                &form.restrictions
            )
        )?;
        writeln!(
            f,
            r#"<label for="notes">기타 요청사항 (최대한 구체적으로 적어주세요)</label>"#
        )?;
        writeln!(
            f,
            r#"<textarea id="notes" name="notes" rows="4" placeholder="{}">{}</textarea>"#,
            Escaped(NOTES_PLACEHOLDER),
            Escaped(&form.notes)
        )?;
        writeln!(
            f,
            r#"<button id="submit-button" type="submit">{SUBMIT_LABEL}</button>"#
        )?;
        writeln!(f, "</form>")
    }
}

struct Select<C> {
    name: &'static str,
    label: &'static str,
    selected: C,
}

impl<C: FormChoice> Select<C> {
    fn new(name: &'static str, label: &'static str, selected: C) -> Self {
        Self {
            name,
            label,
            selected,
        }
    }
}

impl<C: FormChoice> Display for Select<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = self.name;
        writeln!(f, r#"<label for="{name}">{}</label>"#, self.label)?;
        writeln!(f, r#"<select id="{name}" name="{name}">"#)?;
        for choice in C::ALL.iter().copied() {
            let selected = if choice == self.selected { " selected" } else { "" };
            writeln!(
                f,
                r#"<option value="{}"{selected}>{}</option>"#,
                choice.value(),
                choice.label()
            )?;
        }
        writeln!(f, "</select>")
    }
}

struct Radio<C> {
    name: &'static str,
    legend: &'static str,
    checked: C,
}

impl<C: FormChoice> Radio<C> {
    fn new(name: &'static str, legend: &'static str, checked: C) -> Self {
        Self {
            name,
            legend,
            checked,
        }
    }
}

impl<C: FormChoice> Display for Radio<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = self.name;
        writeln!(f, "<fieldset>")?;
        writeln!(f, "<legend>{}</legend>", self.legend)?;
        for choice in C::ALL.iter().copied() {
            let value = choice.value();
            let checked = if choice == self.checked { " checked" } else { "" };
            writeln!(
                f,
                r#"<label><input type="radio" name="{name}" value="{value}"{checked}> {}</label>"#,
                choice.label()
            )?;
        }
        writeln!(f, "</fieldset>")
    }
}

struct TextInput<'a> {
    name: &'static str,
    label: &'static str,
    value: &'a str,
}

impl<'a> TextInput<'a> {
    fn new(name: &'static str, label: &'static str, value: &'a str) -> Self {
        Self { name, label, value }
    }
}

impl Display for TextInput<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = self.name;
        writeln!(f, r#"<label for="{name}">{}</label>"#, self.label)?;
        writeln!(
            f,
            r#"<input id="{name}" name="{name}" type="text" value="{}">"#,
            Escaped(self.value)
        )
    }
}

/// Small stand-alone page for refused requests.
pub struct Notice {
    pub message: &'static str,
    pub detail: String,
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="ko">"#)?;
        writeln!(f, r#"<head><meta charset="UTF-8"><title>{TITLE}</title></head>"#)?;
        writeln!(f, "<body>")?;
        writeln!(f, "<p>{}</p>", self.message)?;
        writeln!(f, "<p><small>{}</small></p>", Escaped(&self.detail))?;
        writeln!(f, r#"<p><a href="/">{TITLE}</a></p>"#)?;
        writeln!(f, "</body>")?;
        write!(f, "</html>")
    }
}
