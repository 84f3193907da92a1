use crate::bot::commands::fail_reply;
use crate::bot::{Outbound, Services};
use crate::error::BotError;
use crate::store::models::{Role, UserRecord};
use crate::utils::format;

const APPROVE_USAGE: &str = "/approve <id> <alias> <cabang>";

/// `/reg` is stateless relative to the session machine: approval is a
/// separate admin-initiated transaction, so nothing is stored here.
pub async fn request(services: &Services, sender: i64) -> Vec<Outbound> {
    let user_id = sender.to_string();
    match services.directory.find_by_id(&user_id).await {
        Ok(Some(user)) => vec![Outbound {
            chat_id: sender,
            text: format::format_info_message(&format!(
                "Anda sudah terdaftar sebagai {} (cabang {}).",
                user.alias, user.branch
            )),
        }],
        Ok(None) => {
            let mut replies = Vec::new();
            match services.config.admin_chat_id {
                Some(admin_chat_id) => replies.push(Outbound {
                    chat_id: admin_chat_id,
                    text: format!(
                        "Permintaan registrasi baru dari ID {user_id}.\n\
                         Untuk menyetujui: /approve {user_id} <alias> <cabang>"
                    ),
                }),
                None => {
                    tracing::warn!(
                        "ADMIN_CHAT_ID is not set; registration request from {} was not forwarded",
                        user_id
                    );
                }
            }
            replies.push(Outbound {
                chat_id: sender,
                text: "Permintaan registrasi Anda telah dikirim ke admin. Mohon tunggu persetujuan."
                    .to_string(),
            });
            replies
        }
        Err(error) => vec![fail_reply(sender, &error)],
    }
}

/// `/approve <id> <alias> <cabang>`, admin/owner only.
pub async fn approve(services: &Services, sender: i64, args: &[String]) -> Vec<Outbound> {
    match try_approve(services, sender, args).await {
        Ok(replies) => replies,
        Err(error) => vec![fail_reply(sender, &error)],
    }
}

async fn try_approve(
    services: &Services,
    sender: i64,
    args: &[String],
) -> Result<Vec<Outbound>, BotError> {
    let caller_role = services.directory.role_of(&sender.to_string()).await?;
    if !caller_role.is_some_and(|role| role.can_approve()) {
        return Err(BotError::PermissionDenied);
    }
    if args.len() < 3 {
        return Err(BotError::MalformedCommand(APPROVE_USAGE));
    }

    let target_id = &args[0];
    let alias = &args[1];
    let branch = args[2..].join(" ");

    if let Some(existing) = services.directory.find_by_id(target_id).await? {
        return Ok(vec![Outbound {
            chat_id: sender,
            text: format::format_info_message(&format!(
                "ID {} sudah terdaftar sebagai {}.",
                target_id, existing.alias
            )),
        }]);
    }

    services
        .directory
        .register(&UserRecord {
            user_id: target_id.clone(),
            alias: alias.clone(),
            branch: branch.clone(),
            role: Role::User,
        })
        .await?;

    let mut replies = vec![Outbound {
        chat_id: sender,
        text: format::format_success_message(&format!(
            "User {alias} (ID {target_id}) disetujui untuk cabang {branch}."
        )),
    }];
    // Chat ids are numeric; a non-numeric target cannot be notified.
    match target_id.parse::<i64>() {
        Ok(target_chat_id) => replies.push(Outbound {
            chat_id: target_chat_id,
            text: format::format_success_message(&format!(
                "Registrasi Anda telah disetujui. Selamat datang, {alias} (cabang {branch})! \
                 Gunakan /checkin saat tiba di toko."
            )),
        }),
        Err(_) => {
            tracing::warn!("Approved id {} is not a chat id; skipping confirmation", target_id);
        }
    }
    Ok(replies)
}
