use chrono::{DateTime, Utc};

use crate::bot::commands::fail_reply;
use crate::bot::session::SessionState;
use crate::bot::{Outbound, Services};
use crate::error::BotError;
use crate::store::models::UserRecord;
use crate::utils::{format, parse, time};

const CHECKOUT_USAGE: &str =
    "Bertemu: <nama>\nOrder: <nominal>\nTagihan: <nominal>\nKendala: <keterangan>";

/// `/checkin` verifies the caller may start a visit, then asks for the
/// store description.
pub async fn begin_checkin(services: &Services, sender: i64) -> (Vec<Outbound>, SessionState) {
    match checkin_allowed(services, sender).await {
        Ok(()) => (
            vec![Outbound {
                chat_id: sender,
                text: "Silakan kirim nama toko dan daerah (format: Nama Toko, Daerah)."
                    .to_string(),
            }],
            SessionState::AwaitingStoreInfo,
        ),
        Err(error) => (vec![fail_reply(sender, &error)], SessionState::Idle),
    }
}

async fn checkin_allowed(services: &Services, sender: i64) -> Result<(), BotError> {
    let user_id = sender.to_string();
    services
        .directory
        .find_by_id(&user_id)
        .await?
        .ok_or(BotError::NotRegistered)?;
    if services.ledger.find_open_record(&user_id).await?.is_some() {
        return Err(BotError::DuplicateOpenRecord);
    }
    Ok(())
}

/// Location received: the pending check-in is written to the ledger.
pub async fn complete_checkin(
    services: &Services,
    sender: i64,
    store_name: &str,
    area: &str,
    lat: f64,
    lon: f64,
    timestamp: DateTime<Utc>,
) -> Vec<Outbound> {
    match try_complete_checkin(services, sender, store_name, area, lat, lon, timestamp).await {
        Ok(reply) => vec![reply],
        Err(error) => vec![fail_reply(sender, &error)],
    }
}

async fn try_complete_checkin(
    services: &Services,
    sender: i64,
    store_name: &str,
    area: &str,
    lat: f64,
    lon: f64,
    timestamp: DateTime<Utc>,
) -> Result<Outbound, BotError> {
    let user = lookup_user(services, sender).await?;
    let link = maps_link(lat, lon);
    let ts = time::format_timestamp(timestamp);
    services
        .ledger
        .open_checkin(&user, store_name, area, &link, &ts)
        .await?;
    Ok(Outbound {
        chat_id: sender,
        text: format::format_success_message(&format!(
            "Check-in di {store_name} tercatat pukul {}. Gunakan /checkout saat kunjungan selesai.",
            time::format_time(timestamp)
        )),
    })
}

/// `/checkout` verifies an open record exists, then asks for the report.
pub async fn begin_checkout(services: &Services, sender: i64) -> (Vec<Outbound>, SessionState) {
    match checkout_allowed(services, sender).await {
        Ok(()) => (
            vec![Outbound {
                chat_id: sender,
                text: format!("Silakan kirim laporan kunjungan dengan format:\n{CHECKOUT_USAGE}"),
            }],
            SessionState::AwaitingCheckoutForm,
        ),
        Err(error) => (vec![fail_reply(sender, &error)], SessionState::Idle),
    }
}

async fn checkout_allowed(services: &Services, sender: i64) -> Result<(), BotError> {
    let user_id = sender.to_string();
    services
        .directory
        .find_by_id(&user_id)
        .await?
        .ok_or(BotError::NotRegistered)?;
    services
        .ledger
        .find_open_record(&user_id)
        .await?
        .ok_or(BotError::NoOpenRecord)?;
    Ok(())
}

/// Report received: parses the form and closes the open record. The caller
/// resets the session to idle whatever happens here.
pub async fn complete_checkout(
    services: &Services,
    sender: i64,
    body: &str,
    timestamp: DateTime<Utc>,
) -> Vec<Outbound> {
    match try_complete_checkout(services, sender, body, timestamp).await {
        Ok(reply) => vec![reply],
        Err(error) => vec![fail_reply(sender, &error)],
    }
}

async fn try_complete_checkout(
    services: &Services,
    sender: i64,
    body: &str,
    timestamp: DateTime<Utc>,
) -> Result<Outbound, BotError> {
    let form =
        parse::parse_checkout_form(body).ok_or(BotError::MalformedCommand(CHECKOUT_USAGE))?;
    let ts = time::format_timestamp(timestamp);
    services
        .ledger
        .close_checkin(
            &sender.to_string(),
            &ts,
            &form.order,
            &form.tagihan,
            &form.kendala,
        )
        .await?;
    Ok(Outbound {
        chat_id: sender,
        text: format::format_success_message(&format!(
            "Check-out tercatat pada {ts}. Bertemu: {}. Terima kasih atas laporannya.",
            form.bertemu
        )),
    })
}

/// `/status` shows the caller's open check-in, if any.
pub async fn status(services: &Services, sender: i64) -> Vec<Outbound> {
    match try_status(services, sender).await {
        Ok(reply) => vec![reply],
        Err(error) => vec![fail_reply(sender, &error)],
    }
}

async fn try_status(services: &Services, sender: i64) -> Result<Outbound, BotError> {
    let user = lookup_user(services, sender).await?;
    let text = match services.ledger.find_open_record(&user.user_id).await? {
        Some((_, record)) => {
            if record.area.is_empty() {
                format!(
                    "Anda sedang check-in di {} sejak {}.",
                    record.store_name, record.checkin_ts
                )
            } else {
                format!(
                    "Anda sedang check-in di {} ({}) sejak {}.",
                    record.store_name, record.area, record.checkin_ts
                )
            }
        }
        None => "Tidak ada check-in yang sedang terbuka.".to_string(),
    };
    Ok(Outbound {
        chat_id: sender,
        text: format::format_info_message(&text),
    })
}

async fn lookup_user(services: &Services, sender: i64) -> Result<UserRecord, BotError> {
    services
        .directory
        .find_by_id(&sender.to_string())
        .await?
        .ok_or(BotError::NotRegistered)
}

fn maps_link(lat: f64, lon: f64) -> String {
    format!("https://www.google.com/maps?q={lat},{lon}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_link() {
        assert_eq!(maps_link(1.0, 2.0), "https://www.google.com/maps?q=1,2");
        assert_eq!(
            maps_link(-6.2146, 106.8451),
            "https://www.google.com/maps?q=-6.2146,106.8451"
        );
    }
}
