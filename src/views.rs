//! Server-rendered HTML for the login, schedule and class-detail screens.
//!
//! Every string that came from the API or the user goes through [`escape`].

use std::fmt::Write;

use crate::models::{ClassView, Participant};
use crate::week::{ScheduleDay, Week};

const APP_NAME: &str = "Iron Fit";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn badge(class: &ClassView) -> Option<String> {
    if class.full {
        return Some("Full".to_string());
    }
    class.spots_left.map(|n| match n {
        1 => "1 spot left".to_string(),
        n => format!("{n} spots left"),
    })
}

pub fn list_action(class: &ClassView) -> &'static str {
    if class.full { "Join waitlist" } else { "Reserve" }
}

pub fn detail_action(class: &ClassView) -> &'static str {
    if class.full {
        "Join Waitlist"
    } else if class.reserved {
        "Cancel Reservation"
    } else {
        "Reserve Spot"
    }
}

/// Two-letter avatar text for a participant name.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().unwrap_or("");
    let mut chars = first.chars();
    let a = chars.next();
    let b = words.next().and_then(|w| w.chars().next()).or_else(|| chars.next());
    a.into_iter().chain(b).flat_map(char::to_uppercase).collect()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

fn logout_form() -> &'static str {
    "<form class=\"logout\" method=\"post\" action=\"/logout\"><button type=\"submit\">Sign out</button></form>"
}

pub fn login_page(error: Option<&str>, username: &str, from: Option<&str>) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<div class=\"login\">\n<h1 class=\"login__title\">{APP_NAME}</h1>\n\
         <p class=\"login__subtitle\">Sign in to continue</p>\n\
         <form class=\"login__form\" method=\"post\" action=\"/\">\n\
         <label class=\"field\"><span>Username</span>\
         <input type=\"text\" name=\"username\" value=\"{}\" autocomplete=\"username\" required></label>\n\
         <label class=\"field\"><span>Password</span>\
         <input type=\"password\" name=\"password\" autocomplete=\"current-password\" required></label>\n",
        escape(username)
    );
    if let Some(from) = from {
        let _ = writeln!(
            body,
            "<input type=\"hidden\" name=\"from\" value=\"{}\">",
            escape(from)
        );
    }
    if let Some(error) = error {
        let _ = writeln!(body, "<div class=\"error\" role=\"alert\">{}</div>", escape(error));
    }
    body.push_str("<button class=\"btn btn--primary\" type=\"submit\">Sign In</button>\n</form>\n</div>");
    layout(APP_NAME, &body)
}

fn class_card(class: &ClassView) -> String {
    let mut card = String::new();
    let reserved = if class.reserved { " card--reserved" } else { "" };
    let _ = write!(
        card,
        "<article class=\"card{reserved}\">\n<a href=\"/class/{}\">\n<div class=\"card__header\">\
         <span class=\"time\">{} - {}</span>",
        urlencoding::encode(&class.id),
        escape(&class.start),
        escape(&class.end)
    );
    if let Some(badge) = badge(class) {
        let muted = if class.full { " badge--muted" } else { "" };
        let _ = write!(card, "<span class=\"badge{muted}\">{badge}</span>");
    }
    let _ = write!(
        card,
        "</div>\n<h3 class=\"title\">{}</h3>\n<div class=\"coach\"><span class=\"coach__name\">{}</span></div>\n</a>\n\
         <button class=\"btn {}\"{}>{}</button>\n</article>",
        escape(&class.title),
        escape(&class.instructor),
        if class.full { "btn--muted" } else { "btn--primary" },
        if class.full { " disabled" } else { "" },
        list_action(class)
    );
    card
}

fn day_strip(week: &Week, selected: &ScheduleDay) -> String {
    let mut strip = String::from("<nav class=\"week\" aria-label=\"Choose a day\">\n");
    for day in week.days() {
        let active = day.key == selected.key;
        let _ = writeln!(
            strip,
            "<a class=\"day-pill{}\" href=\"/landing?day={}\" aria-selected=\"{active}\">{}</a>",
            if active { " is-active" } else { "" },
            day.key,
            day.label()
        );
    }
    strip.push_str("</nav>");
    strip
}

/// `classes` is the day's list or the message to show instead of it.
pub fn schedule_page(week: &Week, selected: &ScheduleDay, classes: Result<&[ClassView], &str>) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<div class=\"page\">\n<header class=\"header\">\n<h1 class=\"greeting\">{APP_NAME}</h1>\n\
         <p class=\"subtitle\">Ready to train today?</p>\n{}\n{}\n</header>\n\
         <main class=\"content\">\n<h2 class=\"day-heading\">{}</h2>\n",
        logout_form(),
        day_strip(week, selected),
        selected.date_label()
    );
    match classes {
        Err(message) => {
            let _ = writeln!(body, "<p role=\"alert\">{}</p>", escape(message));
        }
        Ok([]) => body.push_str("<p>No classes scheduled for this day.</p>\n"),
        Ok(classes) => {
            body.push_str("<section class=\"list\">\n");
            for class in classes {
                body.push_str(&class_card(class));
                body.push('\n');
            }
            body.push_str("</section>\n");
        }
    }
    body.push_str("</main>\n</div>");
    layout(APP_NAME, &body)
}

const BACK_LINK: &str = "<a class=\"back\" href=\"/landing\">&larr; Back</a>";

/// `detail` is the class with its participants, `Ok(None)` when the API
/// returned no class, or the message to show instead.
pub fn class_page(detail: Result<Option<(&ClassView, &[Participant])>, &str>) -> String {
    let (class, participants) = match detail {
        Err(message) => {
            let body = format!(
                "<div class=\"detail\">\n{BACK_LINK}\n<p role=\"alert\">{}</p>\n</div>",
                escape(message)
            );
            return layout(APP_NAME, &body);
        }
        Ok(None) => {
            let body = format!("<div class=\"detail\">\n{BACK_LINK}\n<p>Class not found.</p>\n</div>");
            return layout(APP_NAME, &body);
        }
        Ok(Some(found)) => found,
    };

    let mut body = String::new();
    let _ = writeln!(
        body,
        "<div class=\"detail\">\n<header class=\"detail__header\">\n{BACK_LINK}\n{}\n\
         <h1 class=\"detail__title\">{}</h1>\n<p class=\"detail__meta\">{} - {} &bull; {}</p>\n</header>",
        logout_form(),
        escape(&class.title),
        escape(&class.start),
        escape(&class.end),
        escape(&class.instructor)
    );
    if let Some(description) = &class.description {
        let _ = writeln!(body, "<p class=\"detail__desc\">{}</p>", escape(description));
    }
    let _ = writeln!(
        body,
        "<section class=\"participants\">\n<div class=\"participants__header\"><h2>Participants</h2>\
         <span class=\"count\">{}</span></div>\n<ul class=\"people\">",
        participants.len()
    );
    for person in participants {
        let _ = writeln!(
            body,
            "<li class=\"person\"><span class=\"avatar\" aria-hidden=\"true\">{}</span>\
             <span class=\"name\">{}</span></li>",
            escape(&initials(&person.name)),
            escape(&person.name)
        );
    }
    let _ = write!(
        body,
        "</ul>\n</section>\n<footer class=\"detail__actions\">\
         <button class=\"btn {}\"{}>{}</button></footer>\n</div>",
        if class.full { "btn--muted" } else { "btn--primary" },
        if class.full { " disabled" } else { "" },
        detail_action(class)
    );
    layout(&class.title, &body)
}
