use crate::error::BotError;

pub fn format_error_message(error: &str) -> String {
    format!("❌ {}", error)
}

pub fn format_success_message(message: &str) -> String {
    format!("✅ {}", message)
}

pub fn format_info_message(message: &str) -> String {
    format!("ℹ️ {}", message)
}

/// User-facing reply for each failure class. Store faults stay generic; the
/// detail goes to the log, not the chat.
pub fn error_reply(error: &BotError) -> String {
    let text = match error {
        BotError::Store(_) => "Terjadi kesalahan internal. Silakan coba lagi nanti.",
        BotError::NotRegistered => "Anda belum terdaftar. Gunakan /reg untuk mengajukan registrasi.",
        BotError::PermissionDenied => "Anda tidak memiliki izin untuk perintah ini.",
        BotError::MalformedCommand(usage) => {
            return format_error_message(&format!("Format perintah salah. Contoh:\n{}", usage));
        }
        BotError::DuplicateOpenRecord => {
            "Anda masih memiliki check-in yang belum ditutup. Gunakan /checkout terlebih dahulu."
        }
        BotError::NoOpenRecord => {
            "Tidak ada check-in yang terbuka. Gunakan /checkin terlebih dahulu."
        }
    };
    format_error_message(text)
}
