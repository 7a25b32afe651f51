//! HTML pages. Every page goes through [`layout`], which also shows any
//! flash messages drained from the session.

use crate::core::{CartSummary, Product};
use crate::domain::model::format_price;
use std::fmt::Write;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn layout(title: &str, flashes: &[String], body: &str) -> String {
    let mut notices = String::new();
    if !flashes.is_empty() {
        notices.push_str("<ul class=\"flashes\">\n");
        for message in flashes {
            let _ = writeln!(notices, "  <li>{}</li>", escape(message));
        }
        notices.push_str("</ul>\n");
    }

    format!(
        "<!doctype html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{title} - Ubermelon</title>
</head>
<body>
<nav>
  <a href=\"/\">Ubermelon</a>
  <a href=\"/melons\">All Melons</a>
  <a href=\"/cart\">Shopping Cart</a>
  <a href=\"/login\">Log In</a>
</nav>
{notices}<main>
{body}
</main>
</body>
</html>
",
        title = escape(title),
    )
}

pub fn homepage(flashes: &[String]) -> String {
    layout(
        "Home",
        flashes,
        "<h1>Ubermelon</h1>\n<p>The finest melons, delivered.</p>\n<p><a href=\"/melons\">Browse our melons</a></p>",
    )
}

pub fn melon_list(melons: &[Product], flashes: &[String]) -> String {
    let mut body = String::from("<h1>All Melons</h1>\n<ul class=\"melons\">\n");
    for melon in melons {
        let _ = writeln!(
            body,
            "  <li><a href=\"/melon/{}\">{}</a> {}</li>",
            melon.id,
            escape(&melon.common_name),
            melon.price_str()
        );
    }
    body.push_str("</ul>");

    layout("All Melons", flashes, &body)
}

pub fn melon_detail(melon: &Product, flashes: &[String]) -> String {
    let body = format!(
        "<h1>{name}</h1>
<img src=\"{image}\" alt=\"{name}\">
<dl>
  <dt>Type</dt><dd>{melon_type}</dd>
  <dt>Price</dt><dd>{price}</dd>
  <dt>Flesh</dt><dd>{flesh}</dd>
  <dt>Rind</dt><dd>{rind}</dd>
  <dt>Seedless</dt><dd>{seedless}</dd>
</dl>
<p><a class=\"button\" href=\"/add_to_cart/{id}\">Add to Cart</a></p>",
        name = escape(&melon.common_name),
        image = escape(&melon.image_url),
        melon_type = escape(&melon.melon_type),
        price = melon.price_str(),
        flesh = escape(&melon.flesh_color),
        rind = escape(&melon.rind_color),
        seedless = if melon.seedless { "Yes" } else { "No" },
        id = melon.id,
    );

    layout(&melon.common_name, flashes, &body)
}

pub fn cart(summary: &CartSummary, flashes: &[String]) -> String {
    if summary.is_empty() {
        return layout(
            "Shopping Cart",
            flashes,
            "<h1>Shopping Cart</h1>\n<p>Your cart is empty.</p>\n<p>Order Total: $0.00</p>",
        );
    }

    let mut body = String::from(
        "<h1>Shopping Cart</h1>\n<table class=\"cart\">\n<tr><th>Melon</th><th>Qty</th><th>Price</th><th>Total</th></tr>\n",
    );
    for line in &summary.lines {
        let _ = writeln!(
            body,
            "<tr><td><a href=\"/melon/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            line.id,
            escape(&line.common_name),
            line.quantity,
            format_price(line.unit_price),
            format_price(line.subtotal)
        );
    }
    let _ = write!(
        body,
        "</table>\n<p>Order Total: {}</p>\n<p><a class=\"button\" href=\"/checkout\">Checkout</a></p>",
        format_price(summary.order_total)
    );

    layout("Shopping Cart", flashes, &body)
}

pub fn login_form(flashes: &[String]) -> String {
    layout(
        "Log In",
        flashes,
        "<h1>Log In</h1>
<form action=\"/login\" method=\"post\">
  <label>Email <input type=\"email\" name=\"email\"></label>
  <label>Password <input type=\"password\" name=\"password\"></label>
  <button type=\"submit\">Log In</button>
</form>",
    )
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &[],
        &format!("<h1>{}</h1>\n<p>{}</p>", escape(title), escape(message)),
    )
}
