//! Remote method names, exactly as the service expects them.

// ============================================================================
// Service
// ============================================================================

pub const SERVICE_PING: &str = "Service_Ping_Get";
pub const SERVICE_TIME: &str = "Service_DateTime_Get";
pub const SERVICE_VERSION: &str = "Service_Version_Get";
pub const APPLICATION_STATS: &str = "Application_Metrics_GetStats";

// ============================================================================
// User accounts
// ============================================================================

pub const PROFILE_CREATE: &str = "UserAccount_Profile_Create";
pub const PROFILE_RECOVER: &str = "UserAccount_Profile_Recover";
pub const PROFILE_FROM_TOKEN: &str = "UserAccount_Profile_GetFromUserToken";
pub const PROFILE_FROM_ID: &str = "UserAccount_Profile_GetFromUserID";
pub const PROFILE_FROM_NAME: &str = "UserAccount_Profile_GetFromUserName";
pub const PROFILE_EXCHANGE_SOCIAL_TOKEN: &str = "UserAccount_Profile_ExchangeSocialToken";
pub const PROFILE_SOCIAL_LOGIN: &str = "UserAccount_Profile_SocialLogin";
pub const PROFILE_CHECK_USER_NAME: &str = "UserAccount_Profile_CheckUserName";
pub const PROFILE_CHECK_EMAIL: &str = "UserAccount_Profile_CheckUserEmail";
pub const PROFILE_UPDATE: &str = "UserAccount_Profile_Update";
pub const PROFILE_DELETE: &str = "UserAccount_Profile_DeleteAccount";
pub const PROFILE_SEARCH: &str = "UserAccount_Profile_Search";
pub const LOCATION_CHECK_IN: &str = "UserAccount_Location_Checkin";
pub const LOCATION_CHECK_INS: &str = "UserAccount_Location_GetCheckins";
pub const PROFILE_PHOTO_ADD: &str = "Pictures_ProfilePhoto_Add";
pub const PROFILE_PHOTO_GET_ALL: &str = "Pictures_ProfilePhoto_GetAll";
pub const PROFILE_PHOTO_DELETE: &str = "Pictures_ProfilePhoto_Delete";
pub const PROFILE_PHOTO_SET: &str = "Pictures_ProfilePhoto_Set";
pub const PROFILE_PHOTO_BYTES: &str = "Pictures_ProfilePhoto_GetBytes";

pub const IDENTITY_ADD: &str = "UserAccount_Identity_AddNewValue";
pub const IDENTITY_REMOVE: &str = "UserAccount_Identity_RemoveValue";
pub const IDENTITY_GET_ALL: &str = "UserAccount_Identity_GetMyList";
pub const IDENTITY_CHECK: &str = "UserAccount_Identity_CheckForValues";

// ============================================================================
// Metadata
// ============================================================================

/// One method name per metadata operation, for a single scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataMethods {
    pub set: &'static str,
    pub get: &'static str,
    pub get_all: &'static str,
    pub delete: &'static str,
    pub delete_all: &'static str,
    pub search: &'static str,
    pub sum: &'static str,
    pub batch_sum: &'static str,
}

pub const APP_METADATA: MetadataMethods = MetadataMethods {
    set: "MetaData_ApplicationMetaDataValue_Set",
    get: "MetaData_ApplicationMetaDataValue_Get",
    get_all: "MetaData_ApplicationMetaDataValue_GetAll",
    delete: "MetaData_ApplicationMetaDataValue_Delete",
    delete_all: "MetaData_ApplicationMetaDataValue_DeleteAll",
    search: "MetaData_ApplicationMetaDataValue_SearchData",
    sum: "MetaData_ApplicationMetaDataValue_Sum",
    batch_sum: "MetaData_ApplicationMetaDataValue_BatchSum",
};

pub const USER_METADATA: MetadataMethods = MetadataMethods {
    set: "MetaData_UserMetaDataValue_Set",
    get: "MetaData_UserMetaDataValue_Get",
    get_all: "MetaData_UserMetaDataValue_GetAll",
    delete: "MetaData_UserMetaDataValue_Delete",
    delete_all: "MetaData_UserMetaDataValue_DeleteAll",
    search: "MetaData_UserMetaDataValue_SearchData",
    sum: "MetaData_UserMetaDataValue_Sum",
    batch_sum: "MetaData_UserMetaDataValue_BatchSum",
};

// ============================================================================
// Social
// ============================================================================

pub const FRIENDS_GET_ALL: &str = "Friends_Friends_GetAll";
pub const FRIENDS_REMOVE: &str = "Friends_Friends_Remove";
pub const FRIENDS_SEARCH: &str = "Friends_Friends_Search";
pub const FRIEND_REQUEST_ADD: &str = "Friends_FriendRequest_Add";
pub const FRIEND_REQUEST_ACCEPT: &str = "Friends_FriendRequest_Accept";
pub const FRIEND_REQUEST_DENY: &str = "Friends_FriendRequest_Deny";
pub const FRIEND_REQUEST_RECEIVED: &str = "Friends_FriendRequest_Get";
pub const FRIEND_REQUEST_SENT: &str = "Friends_FriendRequest_GetSentRequests";

pub const MESSAGE_SEND: &str = "Messages_Message_Send";
pub const MESSAGES_RECEIVED: &str = "Messages_Messages_Get";
pub const MESSAGES_SENT: &str = "Messages_SentMessages_Get";

pub const GROUP_CREATE: &str = "GroupMessages_Manage_CreateGroup";
pub const GROUP_EXISTS: &str = "GroupMessages_Manage_CheckForGroup";
pub const GROUP_DELETE: &str = "GroupMessages_Manage_DeleteGroup";
pub const GROUP_GET_ALL: &str = "GroupMessages_Membership_GetAllGroups";
pub const GROUP_GET_MINE: &str = "GroupMessages_Membership_GetMyList";
pub const GROUP_JOIN: &str = "GroupMessages_Membership_JoinGroup";
pub const GROUP_LEAVE: &str = "GroupMessages_Membership_DepartGroup";
pub const GROUP_ADD_MEMBER: &str = "GroupMessages_Membership_AddNewMember";
pub const GROUP_REMOVE_MEMBER: &str = "GroupMessages_Membership_RemoveUser";
pub const GROUP_MESSAGE_SEND: &str = "GroupMessages_Message_Send";
pub const GROUP_MESSAGES: &str = "GroupMessages_Message_Get";

// ============================================================================
// Devices and commerce
// ============================================================================

pub const DEVICE_INFORMATION_ADD: &str = "Analytics_DeviceInformation_Add";
pub const CRASH_RECORD_ADD: &str = "Analytics_CrashRecords_Add";

pub const RECEIPTS_GET_ALL: &str = "Commerce_Receipt_GetAll";
pub const RECEIPT_FOR_TRANSACTION: &str = "Commerce_Receipt_GetFromStoreTransactionID";
pub const RECEIPT_SAVE: &str = "Commerce_Receipt_Save";
pub const RECEIPT_VERIFY_AND_SAVE: &str = "Commerce_Receipt_VerifyAndSaveiOSReceipt";
pub const STORE_ITEMS_ALL: &str = "Commerce_Store_GetAllItems";
pub const STORE_ITEMS_ACTIVE: &str = "Commerce_Store_GetActiveItems";
pub const STORE_ITEMS_FREE: &str = "Commerce_Store_GetFreeItems";

// ============================================================================
// Games
// ============================================================================

pub const SCORE_BOARD_HIGH: &str = "Game_Score_GetBoardHighScores";
pub const SCORE_BOARD_LOW: &str = "Game_Score_GetBoardLowScores";
pub const SCORE_SEARCH: &str = "Game_Score_SearchScores";
pub const SCORE_ADD: &str = "Game_Score_Add";
pub const SCORES_FOR_USER: &str = "Game_Score_GetScoresForUser";
pub const SCORES_DELETE_ALL: &str = "Game_Score_DeleteAllScoresForUser";

pub const PLAYER_ADD: &str = "Game_Player_Add";
pub const PLAYER_UPDATE: &str = "Game_Player_Update";
pub const PLAYER_DELETE: &str = "Game_Player_Delete";
pub const PLAYER_INFO: &str = "Game_Player_GetPlayerInfo";
pub const PLAYER_SEARCH: &str = "Game_Player_SearchPlayers";

pub const STATE_ADD: &str = "Game_State_Add";
pub const STATE_UPDATE: &str = "Game_State_Update";
pub const STATE_GET: &str = "Game_State_Get";
pub const STATE_REMOVE: &str = "Game_State_Remove";
pub const STATE_GET_ALL: &str = "Game_State_GetAll";

// ============================================================================
// Pictures
// ============================================================================

pub const ALBUM_CREATE: &str = "Pictures_PhotoAlbum_Create";
pub const ALBUM_GET: &str = "Pictures_PhotoAlbum_Get";
pub const ALBUM_GET_ALL: &str = "Pictures_PhotoAlbum_GetAllPictures";
pub const ALBUM_DELETE: &str = "Pictures_PhotoAlbum_Delete";
pub const PHOTO_ADD: &str = "Pictures_Photo_Add";
pub const PHOTO_GET: &str = "Pictures_Photo_Get";
pub const PHOTO_DELETE: &str = "Pictures_Photo_Delete";
pub const PHOTO_SET_APP_TAG: &str = "Pictures_Photo_SetAppTag";
pub const PHOTO_SEARCH_NEARBY: &str = "Pictures_SearchPhotos_Nearby";

pub const VIRTUAL_ALBUM_CREATE: &str = "Pictures_VirtualAlbum_Create";
pub const VIRTUAL_ALBUM_INFO: &str = "Pictures_VirtualAlbum_GetAlbumInformation";
pub const VIRTUAL_ALBUM_PICTURES: &str = "Pictures_VirtualAlbum_Get";
pub const VIRTUAL_ALBUM_GET_MINE: &str = "Pictures_VirtualAlbum_GetMyAlbums";
pub const VIRTUAL_ALBUM_ADD_PHOTO: &str = "Pictures_VirtualAlbum_AddPhoto";
pub const VIRTUAL_ALBUM_REMOVE_PHOTO: &str = "Pictures_VirtualAlbum_RemovePhoto";
pub const VIRTUAL_ALBUM_UPDATE: &str = "Pictures_VirtualAlbum_Update";
pub const VIRTUAL_ALBUM_DELETE: &str = "Pictures_VirtualAlbum_DeleteAlbum";

// ============================================================================
// Files
// ============================================================================

/// Method names for one kind of stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMethods {
    pub add: &'static str,
    pub info: &'static str,
    pub download: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub list: &'static str,
    pub search: &'static str,
    /// Multipart field carrying the file body.
    pub upload_field: &'static str,
    /// Parameter naming the file id.
    pub id_param: &'static str,
}

pub const BLOBS: FileMethods = FileMethods {
    add: "Blobs_Blob_AddBlob",
    info: "Blobs_Blob_GetBlobInfo",
    download: "Blobs_Blob_GetBlob",
    edit: "Blobs_Blob_EditInfo",
    delete: "Blobs_Blob_DeleteBlob",
    list: "Blobs_Blob_GetMyList",
    search: "Blobs_Blob_SearchBlobs",
    upload_field: "blobData",
    id_param: "BlobID",
};

pub const VIDEOS: FileMethods = FileMethods {
    add: "Videos_Video_AddVideo",
    info: "Videos_Video_GetVideoInfo",
    download: "Videos_Video_GetVideo",
    edit: "Videos_Video_EditInfo",
    delete: "Videos_Video_DeleteVideo",
    list: "Videos_Video_GetMyList",
    search: "Videos_Video_SearchVideos",
    upload_field: "videoData",
    id_param: "VideoID",
};

// ============================================================================
// Push notifications
// ============================================================================

/// Method names of one push platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushMethods {
    pub register: &'static str,
    pub unregister: &'static str,
    pub groups: &'static str,
    pub devices: &'static str,
    pub send: &'static str,
}

pub const PUSH_APPLE: PushMethods = PushMethods {
    register: "PushApple_Device_Register",
    unregister: "PushApple_Device_Remove",
    groups: "PushApple_Registration_GetGroups",
    devices: "PushApple_Registration_GetRegisteredDevices",
    send: "PushApple_Notifications_SendRawMessage",
};

pub const PUSH_ANDROID: PushMethods = PushMethods {
    register: "PushAndroid_Device_Register",
    unregister: "PushAndroid_Device_Remove",
    groups: "PushAndroid_Registration_GetGroups",
    devices: "PushAndroid_Registration_GetRegisteredDevices",
    send: "PushAndroid_Notifications_SendRawMessage",
};

pub const PUSH_WIN8: PushMethods = PushMethods {
    register: "PushWin8_Device_Register",
    unregister: "PushWin8_Device_Remove",
    groups: "PushWin8_Registration_GetGroups",
    devices: "PushWin8_Registration_GetRegisteredDevices",
    send: "PushWin8_Notifications_SendToast",
};

pub const PUSH_WINDOWS_PHONE: PushMethods = PushMethods {
    register: "PushWP_Device_Register",
    unregister: "PushWP_Device_Remove",
    groups: "PushWP_Registration_GetGroups",
    devices: "PushWP_Registration_GetRegisteredDevices",
    send: "PushWP_Notifications_SendToast",
};
