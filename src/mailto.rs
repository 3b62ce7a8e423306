//! The mailto fallback submission path: turns collected contact-form fields
//! into a `mailto:` URI the browser layer navigates to.

const SUBJECT: &str = "Consulta desde web - Refycon";
const UNSPECIFIED: &str = "No especificado";

/// Contact-form fields as collected at submit time. `None` means the field
/// was absent or empty; the body renders a placeholder for it.
#[derive(Debug, Clone, Default)]
pub struct ContactMessage {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub servicio: Option<String>,
    pub mensaje: Option<String>,
    pub privacidad: bool,
}

fn field(v: &Option<String>) -> &str {
    match v {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => UNSPECIFIED,
    }
}

pub fn build_body(msg: &ContactMessage) -> String {
    format!(
        "Nueva consulta desde el formulario web:\n\n\
         Nombre: {}\n\
         Email: {}\n\
         Teléfono: {}\n\
         Tipo de servicio: {}\n\n\
         Mensaje:\n{}\n\n\
         Política de privacidad aceptada: {}",
        field(&msg.nombre),
        field(&msg.email),
        field(&msg.telefono),
        field(&msg.servicio),
        field(&msg.mensaje),
        if msg.privacidad { "Sí" } else { "No" }
    )
}

pub fn build_mailto_url(to: &str, msg: &ContactMessage) -> String {
    format!(
        "mailto:{to}?subject={}&body={}",
        encode_uri_component(SUBJECT),
        encode_uri_component(&build_body(msg))
    )
}

/// Percent-encoding with `encodeURIComponent` semantics: ASCII letters,
/// digits, and `- _ . ! ~ * ' ( )` pass through; everything else is encoded
/// per UTF-8 byte.
pub fn encode_uri_component(s: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_matches_encode_uri_component() {
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_uri_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_uri_component("Sí"), "S%C3%AD");
        assert_eq!(encode_uri_component("ok-_.!~*'()"), "ok-_.!~*'()");
    }

    #[test]
    fn body_fills_missing_fields_with_placeholder() {
        let body = build_body(&ContactMessage {
            nombre: Some("Ana".to_string()),
            privacidad: true,
            ..ContactMessage::default()
        });
        assert!(body.contains("Nombre: Ana"));
        assert!(body.contains("Email: No especificado"));
        assert!(body.contains("Teléfono: No especificado"));
        assert!(body.contains("Política de privacidad aceptada: Sí"));
    }

    #[test]
    fn privacy_not_accepted_renders_no() {
        let body = build_body(&ContactMessage::default());
        assert!(body.ends_with("Política de privacidad aceptada: No"));
    }

    #[test]
    fn url_targets_the_recipient_with_encoded_subject() {
        let url = build_mailto_url("refyconpro@gmail.com", &ContactMessage::default());
        assert!(url.starts_with("mailto:refyconpro@gmail.com?subject="));
        assert!(url.contains("Consulta%20desde%20web%20-%20Refycon"));
        assert!(url.contains("&body="));
        assert!(!url.contains(' '), "everything outside the address is encoded");
    }
}
