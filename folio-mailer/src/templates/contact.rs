use askama::Template;

/// HTML body of a contact-form notification. All fields are HTML-escaped.
#[derive(Template)]
#[template(
    source = r#"
<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">New Portfolio Contact Message</h2>
  <div style="background-color: #f5f5f5; padding: 20px; border-radius: 5px;">
    <p><strong>From:</strong> {{ sender_name }}</p>
    <p><strong>Email:</strong> {{ sender_email }}</p>
    <p><strong>Message:</strong></p>
    <p style="color: #666; line-height: 1.6;">{% for line in message_lines %}{{ line }}{% if !loop.last %}<br>{% endif %}{% endfor %}</p>
  </div>
  <p style="color: #999; font-size: 12px; margin-top: 20px;">
    This message was sent from your 3D Portfolio website.
  </p>
</div>
"#,
    ext = "html"
)]
pub struct ContactTemplate<'a> {
    pub sender_name: &'a str,
    pub sender_email: &'a str,
    pub message_lines: Vec<&'a str>,
}

impl<'a> ContactTemplate<'a> {
    pub fn new(sender_name: &'a str, sender_email: &'a str, message: &'a str) -> Self {
        Self {
            sender_name,
            sender_email,
            message_lines: message.split('\n').collect(),
        }
    }
}
