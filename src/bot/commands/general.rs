use crate::bot::Outbound;

pub fn start(chat_id: i64) -> Outbound {
    Outbound {
        chat_id,
        text: "Bot aktif. Silakan gunakan perintah. Ketik /help untuk daftar perintah.".to_string(),
    }
}

pub fn help(chat_id: i64) -> Outbound {
    let text = "\
/start — Mulai bot
/help — Bantuan
/reg — Ajukan registrasi ke admin
/approve <id> <alias> <cabang> — Setujui registrasi (admin)
/checkin — Catat kedatangan di toko
/checkout — Catat laporan dan akhiri kunjungan
/status — Lihat check-in yang sedang terbuka";
    Outbound {
        chat_id,
        text: text.to_string(),
    }
}

pub fn unrecognized(chat_id: i64) -> Outbound {
    Outbound {
        chat_id,
        text: "Maaf, saya tidak mengerti. Ketik /help untuk daftar perintah.".to_string(),
    }
}
